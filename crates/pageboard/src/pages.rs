//! Canonical page lists, most important page first.

use pageboard_pipeline::PageOrder;

/// Client app pages, matched against `client/<prefix>-<name>.png`.
pub const CLIENT_PAGES: &[&str] = &[
    "home",
    "search",
    "patent-map",
    "patent-map-region-detail",
    "inventors",
    "listing-detail",
    "patent-detail",
    "organizations",
    "organization-detail",
    "trade-rules",
    "login",
    "onboarding-choose-identity",
    "onboarding-verification-form",
    "region-picker",
    "profile-edit",
    "messages",
    "chat",
    "publish",
    "publish-patent",
    "publish-demand",
    "publish-achievement",
    "my-listings",
    "favorites",
    "orders",
    "order-detail",
    "checkout-deposit-pay",
    "checkout-deposit-success",
    "checkout-final-pay",
    "checkout-final-success",
    "me",
];

/// Admin console pages.
pub const ADMIN_PAGES: &[&str] = &[
    "login",
    "dashboard",
    "verifications",
    "listings",
    "orders",
    "refunds",
    "settlements",
    "invoices",
    "config",
    "regions",
    "patent-map",
];

/// Rendered miniapp pages merged by default.
pub const MINIAPP_PAGES: &[&str] = &[
    "01-login",
    "02-home",
    "03-patent-map",
    "04-feeds",
    "05-detail",
    "06-message",
    "07-checkout-deposit-pay",
    "08-checkout-deposit-success",
    "09-checkout-final-pay",
    "10-checkout-final-success",
    "11-user-center",
    "12-publish-chooser",
    "13-publish-patent",
    "14-publish-demand",
    "15-publish-achievement",
];

pub fn client_order() -> PageOrder {
    PageOrder::new(CLIENT_PAGES.iter().copied()).with_prefix("client")
}

pub fn admin_order() -> PageOrder {
    PageOrder::new(ADMIN_PAGES.iter().copied()).with_prefix("admin")
}

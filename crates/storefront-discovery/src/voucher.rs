//! Promotional vouchers and their eligibility.

use crate::ids::{UserId, VoucherId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a voucher takes off an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VoucherDiscount {
    /// Percentage off (0.0 - 100.0).
    Percent(f64),
    /// Fixed amount off.
    Fixed(Money),
}

impl VoucherDiscount {
    /// Calculate the discount amount for a given order total.
    ///
    /// Never exceeds the order total. `None` when a fixed amount is in a
    /// different currency from the order.
    pub fn calculate(&self, order_total: &Money) -> Option<Money> {
        let amount = match self {
            VoucherDiscount::Percent(percent) => order_total.percentage(*percent),
            VoucherDiscount::Fixed(amount) if amount.currency == order_total.currency => *amount,
            VoucherDiscount::Fixed(_) => return None,
        };
        if amount.amount_minor > order_total.amount_minor {
            Some(*order_total)
        } else {
            Some(amount)
        }
    }
}

/// A promotional code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    /// Unique voucher identifier.
    pub id: VoucherId,
    /// Code the shopper copies (e.g., "SALE10").
    pub code: String,
    /// Display title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Value of the voucher.
    pub discount: VoucherDiscount,
    /// Order total required before the voucher applies.
    pub min_order_value: Money,
    /// Cap on the discounted amount.
    #[serde(default)]
    pub max_discount: Option<Money>,
    /// Owner. Unscoped vouchers are public.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Expiry. Open-ended when absent.
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    /// Upstream activation flag.
    pub is_active: bool,
    /// Issued quantity.
    #[serde(default)]
    pub quantity: u32,
    /// Redeemed so far.
    #[serde(default)]
    pub used: u32,
}

impl Voucher {
    /// Create an active, public, open-ended voucher.
    pub fn new(
        id: impl Into<VoucherId>,
        code: impl Into<String>,
        title: impl Into<String>,
        discount: VoucherDiscount,
        min_order_value: Money,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            description: None,
            discount,
            min_order_value,
            max_discount: None,
            user_id: None,
            valid_to: None,
            is_active: true,
            quantity: 0,
            used: 0,
        }
    }

    /// Restrict the voucher to one user.
    pub fn for_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set expiration time.
    pub fn expires_at(mut self, valid_to: DateTime<Utc>) -> Self {
        self.valid_to = Some(valid_to);
        self
    }

    /// Cap the discounted amount.
    pub fn with_max_discount(mut self, max_discount: Money) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    /// Set issued and used counts.
    pub fn with_quantity(mut self, quantity: u32, used: u32) -> Self {
        self.quantity = quantity;
        self.used = used;
        self
    }

    /// Check if the voucher has expired at `now`. Expiry is inclusive of `valid_to`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_to.is_some_and(|valid_to| valid_to < now)
    }

    /// Whether `user` may see this voucher. Anonymous viewers only see public ones.
    pub fn is_visible_to(&self, user: Option<&UserId>) -> bool {
        match &self.user_id {
            None => true,
            Some(owner) => user == Some(owner),
        }
    }

    /// Active, in scope for `user`, and not expired at `now`.
    pub fn is_eligible(&self, user: Option<&UserId>, now: DateTime<Utc>) -> bool {
        self.is_active && self.is_visible_to(user) && !self.is_expired(now)
    }

    /// Codes left to hand out. Shown to the shopper, never used as a gate.
    pub fn remaining(&self) -> u32 {
        self.quantity.saturating_sub(self.used)
    }

    /// Short label for the voucher card, e.g. "10% OFF" or "50.000₫ OFF".
    pub fn label(&self) -> String {
        match self.discount {
            VoucherDiscount::Percent(percent) => format!("{}% OFF", format_percent(percent)),
            VoucherDiscount::Fixed(amount) => format!("{} OFF", amount.display()),
        }
    }

    /// What the voucher would take off `order_total`.
    ///
    /// `None` when the order is below the minimum or in another currency
    /// than the voucher's amounts.
    pub fn discount_preview(&self, order_total: &Money) -> Option<Money> {
        if order_total.currency != self.min_order_value.currency {
            return None;
        }
        if order_total.amount_minor < self.min_order_value.amount_minor {
            return None;
        }

        let amount = self.discount.calculate(order_total)?;
        match self.max_discount {
            Some(cap) if cap.currency == amount.currency && cap < amount => Some(cap),
            _ => Some(amount),
        }
    }
}

/// Vouchers the current viewer can use at `now`, in input order.
pub fn eligible_vouchers<'a>(
    vouchers: &'a [Voucher],
    user: Option<&UserId>,
    now: DateTime<Utc>,
) -> Vec<&'a Voucher> {
    vouchers.iter().filter(|v| v.is_eligible(user, now)).collect()
}

fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}", percent as i64)
    } else {
        format!("{percent:.1}")
    }
}

//! Accounts and balance transfers

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Primary key of the `users` table
pub type AccountId = i64;

/// Maximum length for account holder names
const MAX_NAME_LEN: usize = 128;

/// Maximum length for email addresses
const MAX_EMAIL_LEN: usize = 254;

/// Decimal places stored by `users.balance` (`NUMERIC(18, 2)`)
const MONEY_SCALE: u32 = 2;

/// Loose shape check: one `@`, no whitespace, a dot in the domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

/// Account record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
}

/// Validated input for creating an account
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    name: String,
    email: String,
    balance: Decimal,
}

impl NewAccount {
    /// Validate a new account.
    ///
    /// # Rules
    /// - Name is trimmed and must be non-empty, max 128 characters
    /// - Email must look like `local@domain.tld`
    /// - Opening balance defaults to zero, may not be negative and has at most two
    ///   decimal places
    pub fn new(
        name: &str,
        email: &str,
        balance: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@example.com",
            });
        }

        let balance = balance.unwrap_or(Decimal::ZERO);
        if balance < Decimal::ZERO {
            return Err(ValidationError::InvalidFormat {
                field: "balance",
                reason: "opening balance cannot be negative",
            });
        }
        check_money_scale("balance", balance)?;

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            balance,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Reject amounts the store would round. Trailing zeros are ignored.
fn check_money_scale(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "at most 2 decimal places",
        });
    }
    Ok(())
}

/// Parse an account id strictly: it must be a positive integer.
///
/// Unlike catalog filters, a bad id is an error rather than ignored.
pub fn parse_account_id(raw: Option<&str>) -> Result<AccountId, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "id" });
    }

    let id: AccountId = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "must be an integer",
    })?;
    if id <= 0 {
        return Err(ValidationError::NotPositive { field: "id" });
    }

    Ok(id)
}

/// A single balance movement between two accounts.
///
/// Lives for one request: executed once, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

impl Transfer {
    /// Build a transfer without checking the amount.
    ///
    /// The executor accepts any amount; only the post-transfer balance
    /// check can reject it.
    pub fn new(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    /// Build a transfer, rejecting zero and negative amounts and amounts
    /// finer than the stored balance precision.
    pub fn checked(
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NotPositive { field: "amount" });
        }
        check_money_scale("amount", amount)?;
        Ok(Self::new(from, to, amount))
    }
}

/// Outcome of a committed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    /// Source balance as read inside the transaction, after both updates
    pub from_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_account() {
        let acc = NewAccount::new(" Alice ", "alice@example.com", Some(Decimal::from(100))).unwrap();
        assert_eq!(acc.name(), "Alice");
        assert_eq!(acc.email(), "alice@example.com");
        assert_eq!(acc.balance(), Decimal::from(100));
    }

    #[test]
    fn balance_defaults_to_zero() {
        let acc = NewAccount::new("Bob", "bob@example.com", None).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);
    }

    #[test]
    fn rejects_empty_name() {
        let err = NewAccount::new("  ", "a@b.io", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn rejects_bad_email() {
        for email in ["alice", "alice@", "al ice@example.com", "a@b@c.io"] {
            let err = NewAccount::new("Alice", email, None).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "email", .. }),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_negative_opening_balance() {
        let err = NewAccount::new("Alice", "a@b.io", Some(Decimal::from(-1))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "balance", .. }));
    }

    #[test]
    fn account_id_is_strict() {
        assert_eq!(parse_account_id(Some("42")), Ok(42));
        assert_eq!(parse_account_id(Some(" 7 ")), Ok(7));
        assert_eq!(
            parse_account_id(None),
            Err(ValidationError::Empty { field: "id" })
        );
        assert_eq!(
            parse_account_id(Some("0")),
            Err(ValidationError::NotPositive { field: "id" })
        );
        assert!(matches!(
            parse_account_id(Some("abc")),
            Err(ValidationError::InvalidFormat { field: "id", .. })
        ));
    }

    #[test]
    fn checked_transfer_rejects_non_positive() {
        assert!(Transfer::checked(1, 2, Decimal::ZERO).is_err());
        assert!(Transfer::checked(1, 2, Decimal::from(-5)).is_err());
        assert!(Transfer::checked(1, 1, Decimal::from(5)).is_ok());
    }

    #[test]
    fn checked_transfer_rejects_sub_cent_amounts() {
        let err = Transfer::checked(1, 2, Decimal::new(5, 3)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "amount",
                reason: "at most 2 decimal places",
            }
        );
        assert!(Transfer::checked(1, 2, Decimal::new(10_001, 3)).is_err());

        // 0.01 and 1.500 (trailing zero) are representable
        assert!(Transfer::checked(1, 2, Decimal::new(1, 2)).is_ok());
        assert!(Transfer::checked(1, 2, Decimal::new(1_500, 3)).is_ok());
    }

    #[test]
    fn rejects_sub_cent_opening_balance() {
        let err = NewAccount::new("Alice", "a@b.io", Some(Decimal::new(1_005, 3))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "balance", .. }));

        let acc = NewAccount::new("Alice", "a@b.io", Some(Decimal::new(1_050, 3))).unwrap();
        assert_eq!(acc.balance(), Decimal::new(105, 2));
    }

    #[test]
    fn unchecked_transfer_keeps_amount() {
        let t = Transfer::new(1, 2, Decimal::from(-5));
        assert_eq!(t.amount, Decimal::from(-5));
    }
}

//! Per-session context: who is logged in and what they donated.
//!
//! The session is owned by the application state and handed to whatever
//! needs it; nothing here is global.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::catalog::OrganizationRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Adresse e-mail invalide.")]
    InvalidEmail,

    #[error("Veuillez vous connecter avant de faire un don.")]
    NotLoggedIn,

    #[error("Le montant du don doit être d'au moins 1 €.")]
    InvalidAmount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Card,
    PayPal,
    ApplePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Card, PaymentMethod::PayPal, PaymentMethod::ApplePay];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Carte bancaire",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::ApplePay => "Apple Pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One simulated donation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationRecord {
    pub user: String,
    pub organization: String,
    pub country: String,
    pub domain: String,
    /// Whole euros, at least 1
    pub amount: u32,
    pub payment_method: PaymentMethod,
}

/// Outcome of a successful donation, for the confirmation screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub message: String,
    /// Official donation page, if the organization lists one
    pub donation_url: Option<String>,
}

/// Append-only donation history
#[derive(Clone, Debug, Default)]
pub struct DonationLog {
    entries: Vec<DonationRecord>,
}

impl DonationLog {
    fn push(&mut self, record: DonationRecord) {
        self.entries.push(record);
    }

    pub fn entries(&self) -> &[DonationRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|d| d.amount as u64).sum()
    }

    /// Amount per domain, domains in order of first donation
    pub fn totals_by_domain(&self) -> Vec<(String, u64)> {
        let mut totals: Vec<(String, u64)> = Vec::new();
        for entry in &self.entries {
            match totals.iter_mut().find(|(domain, _)| *domain == entry.domain) {
                Some((_, sum)) => *sum += entry.amount as u64,
                None => totals.push((entry.domain.clone(), entry.amount as u64)),
            }
        }
        totals
    }
}

/// Login format check: an `@` and a `.` somewhere in the address
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<String>,
    donations: DonationLog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str) -> Result<&str, SessionError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(SessionError::InvalidEmail);
        }
        debug!(user = email, "login");
        let user = self.user.insert(email.to_string());
        Ok(user.as_str())
    }

    /// Forget the identity; the history stays for the rest of the process
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(user = %user, "logout");
        }
    }

    pub fn donations(&self) -> &DonationLog {
        &self.donations
    }

    /// Record a simulated donation to `organization`
    pub fn donate(
        &mut self,
        organization: &OrganizationRecord,
        amount: u32,
        payment_method: PaymentMethod,
    ) -> Result<Receipt, SessionError> {
        let user = self.user.clone().ok_or(SessionError::NotLoggedIn)?;
        if amount < 1 {
            return Err(SessionError::InvalidAmount);
        }

        let message = format!(
            "Merci {user} 🙏 Vous avez choisi de donner {amount} € à {} via {payment_method}.",
            organization.name
        );
        debug!(user = %user, organization = %organization.name, amount, "donation recorded");

        self.donations.push(DonationRecord {
            user,
            organization: organization.name.clone(),
            country: organization.country.clone(),
            domain: organization.domain.clone(),
            amount,
            payment_method,
        });

        Ok(Receipt {
            message,
            donation_url: organization.donation_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(name: &str, domain: &str, url: Option<&str>) -> OrganizationRecord {
        OrganizationRecord {
            name: name.into(),
            country: "France".into(),
            domain: domain.into(),
            donation_url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_format() {
        let mut session = Session::new();
        assert_eq!(session.login("bob"), Err(SessionError::InvalidEmail));
        assert_eq!(session.login("bob@example"), Err(SessionError::InvalidEmail));
        assert!(!session.is_logged_in());

        assert_eq!(session.login(" bob@example.com "), Ok("bob@example.com"));
        assert_eq!(session.user(), Some("bob@example.com"));

        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_donate_requires_login() {
        let mut session = Session::new();
        let result = session.donate(&org("MSF", "Santé", None), 10, PaymentMethod::Card);
        assert_eq!(result, Err(SessionError::NotLoggedIn));
        assert!(session.donations().is_empty());
    }

    #[test]
    fn test_donate_rejects_zero() {
        let mut session = Session::new();
        session.login("a@b.fr").unwrap();
        let result = session.donate(&org("MSF", "Santé", None), 0, PaymentMethod::Card);
        assert_eq!(result, Err(SessionError::InvalidAmount));
        assert!(session.donations().is_empty());
    }

    #[test]
    fn test_donations_append_and_total() {
        let mut session = Session::new();
        session.login("a@b.fr").unwrap();

        let receipt = session
            .donate(&org("MSF", "Santé", Some("https://msf.fr/don")), 20, PaymentMethod::PayPal)
            .unwrap();
        assert_eq!(receipt.donation_url.as_deref(), Some("https://msf.fr/don"));
        assert!(receipt.message.contains("20 €"));
        assert!(receipt.message.contains("PayPal"));

        session.donate(&org("UNICEF", "Éducation", None), 5, PaymentMethod::Card).unwrap();
        session.donate(&org("MdM", "Santé", None), 7, PaymentMethod::ApplePay).unwrap();

        let log = session.donations();
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.entries()[0].organization, "MSF");
        assert_eq!(log.entries()[0].user, "a@b.fr");
        assert_eq!(log.total(), 32);
        assert_eq!(
            log.totals_by_domain(),
            vec![("Santé".to_string(), 27), ("Éducation".to_string(), 5)]
        );
        let by_domain: u64 = log.totals_by_domain().iter().map(|(_, v)| v).sum();
        assert_eq!(by_domain, log.total());
    }

    #[test]
    fn test_history_survives_logout() {
        let mut session = Session::new();
        session.login("a@b.fr").unwrap();
        session.donate(&org("MSF", "Santé", None), 3, PaymentMethod::Card).unwrap();
        session.logout();
        assert_eq!(session.donations().total(), 3);
    }
}

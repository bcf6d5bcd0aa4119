//! Explicit application state for the admin surface: users, invoices and
//! the admin session flag. The original kept these in ambient session
//! globals; here they live in one `AppState` value the host passes around.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub last_login: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub description: String,
}

/// Demo-grade admin gate: a plain password compare, by design. Real
/// authentication is an explicit non-goal of this dashboard.
#[derive(Debug)]
pub struct AdminSession {
    password: String,
    authenticated: bool,
}

impl AdminSession {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            authenticated: false,
        }
    }

    pub fn login(&mut self, attempt: &str) -> bool {
        self.authenticated = attempt == self.password;
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// All mutable dashboard state outside the table snapshot.
#[derive(Debug)]
pub struct AppState {
    pub users: Vec<User>,
    pub invoices: Vec<Invoice>,
    pub session: AdminSession,
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

impl AppState {
    pub fn new(session: AdminSession) -> Self {
        Self {
            users: Vec::new(),
            invoices: Vec::new(),
            session,
        }
    }

    /// Seed state matching the original demo content.
    pub fn demo() -> Self {
        let users = vec![
            User {
                id: "1".to_string(),
                name: "Admin User".to_string(),
                email: "admin@example.com".to_string(),
                role: "Admin".to_string(),
                last_login: ymd(2024, 4, 21),
            },
            User {
                id: "2".to_string(),
                name: "John Analyst".to_string(),
                email: "john@example.com".to_string(),
                role: "Analyst".to_string(),
                last_login: ymd(2024, 4, 22),
            },
            User {
                id: "3".to_string(),
                name: "Sarah Manager".to_string(),
                email: "sarah@example.com".to_string(),
                role: "Manager".to_string(),
                last_login: ymd(2024, 4, 20),
            },
        ];
        let invoices = vec![
            Invoice {
                id: "INV-2024-001".to_string(),
                date: ymd(2024, 1, 15),
                amount: 1500.00,
                status: InvoiceStatus::Paid,
                description: "Dashboard Setup".to_string(),
            },
            Invoice {
                id: "INV-2024-002".to_string(),
                date: ymd(2024, 2, 15),
                amount: 500.00,
                status: InvoiceStatus::Paid,
                description: "Monthly Maintenance".to_string(),
            },
            Invoice {
                id: "INV-2024-003".to_string(),
                date: ymd(2024, 3, 15),
                amount: 750.00,
                status: InvoiceStatus::Pending,
                description: "Feature Additions".to_string(),
            },
            Invoice {
                id: "INV-2024-004".to_string(),
                date: ymd(2024, 4, 15),
                amount: 500.00,
                status: InvoiceStatus::Pending,
                description: "Monthly Maintenance".to_string(),
            },
        ];
        Self {
            users,
            invoices,
            session: AdminSession::new("admin123"),
        }
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub fn remove_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    /// Total amount across invoices still awaiting payment.
    pub fn pending_invoice_total(&self) -> f64 {
        self.invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Pending)
            .map(|i| i.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_password_gates_the_session() {
        let mut state = AppState::demo();
        assert!(!state.session.is_authenticated());
        assert!(!state.session.login("wrong"));
        assert!(state.session.login("admin123"));
        assert!(state.session.is_authenticated());
        state.session.logout();
        assert!(!state.session.is_authenticated());
    }

    #[test]
    fn failed_login_clears_a_previous_session() {
        let mut session = AdminSession::new("secret");
        assert!(session.login("secret"));
        assert!(!session.login("nope"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn pending_total_sums_only_pending() {
        let state = AppState::demo();
        assert_eq!(state.pending_invoice_total(), 1250.0);
    }

    #[test]
    fn user_management() {
        let mut state = AppState::demo();
        assert_eq!(state.users.len(), 3);
        assert!(state.remove_user("2"));
        assert!(!state.remove_user("2"));
        assert_eq!(state.users.len(), 2);
    }
}

//! Session state and the role-to-filter projection. The active role is a
//! plain value threaded through the UI explicitly; nothing reads it from
//! ambient global state.

use crate::models::Hostel;
use crate::store::RecordFilter;

/// The closed set of administrative roles. Boys/Girls admins see only their
/// own hostel; the super admin sees everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    BoysAdmin,
    GirlsAdmin,
}

impl Role {
    /// Total over arbitrary input: anything unrecognized maps to the
    /// unrestricted role rather than failing.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "BoysAdmin" => Role::BoysAdmin,
            "GirlsAdmin" => Role::GirlsAdmin,
            _ => Role::SuperAdmin,
        }
    }

    /// Derive the record filter for this role, optionally narrowed to one
    /// year. This mapping is the only place role strings influence which
    /// students are visible.
    pub fn record_filter(&self, year: Option<String>) -> RecordFilter {
        let hostel = match self {
            Role::SuperAdmin => None,
            Role::BoysAdmin => Some(Hostel::Boys),
            Role::GirlsAdmin => Some(Hostel::Girls),
        };
        RecordFilter { hostel, year }
    }

    /// Header label shown at the top of the admin screens.
    pub fn title(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::BoysAdmin => "Boys Hostel Admin",
            Role::GirlsAdmin => "Girls Hostel Admin",
        }
    }
}

/// Who is currently using the portal. Chosen on the role picker at launch;
/// logout drops back to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin(Role),
    /// A student identified by their (normalized) record id.
    Student { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_total_over_arbitrary_strings() {
        assert_eq!(Role::parse("BoysAdmin"), Role::BoysAdmin);
        assert_eq!(Role::parse("GirlsAdmin"), Role::GirlsAdmin);
        assert_eq!(Role::parse("SuperAdmin"), Role::SuperAdmin);
        assert_eq!(Role::parse(""), Role::SuperAdmin);
        assert_eq!(Role::parse("Warden"), Role::SuperAdmin);
        assert_eq!(Role::parse(" BoysAdmin "), Role::BoysAdmin);
    }

    #[test]
    fn scoped_roles_restrict_to_their_hostel() {
        assert_eq!(
            Role::BoysAdmin.record_filter(None),
            RecordFilter {
                hostel: Some(Hostel::Boys),
                year: None,
            }
        );
        assert_eq!(
            Role::GirlsAdmin.record_filter(None),
            RecordFilter {
                hostel: Some(Hostel::Girls),
                year: None,
            }
        );
        assert_eq!(Role::SuperAdmin.record_filter(None), RecordFilter::default());
    }

    #[test]
    fn year_filter_passes_through_unchanged() {
        let filter = Role::BoysAdmin.record_filter(Some("2nd".to_string()));
        assert_eq!(filter.year.as_deref(), Some("2nd"));
        assert_eq!(filter.hostel, Some(Hostel::Boys));
    }
}

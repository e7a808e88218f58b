//! Salon service catalog.
//!
//! The menu is an explicit value handed to handlers at construction, not
//! module-level state. The default catalog is the demo salon menu.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable salon service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalonService {
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i64,
}

/// The set of services customers can book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<SalonService>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        let menu = [
            ("Haircut", "45.00", 45),
            ("Blowout", "35.00", 30),
            ("Highlights", "95.00", 75),
            ("Hair Coloring", "120.00", 90),
            ("Keratin Treatment", "150.00", 120),
        ];

        Self {
            services: menu
                .into_iter()
                .map(|(name, price, duration_minutes)| SalonService {
                    name: name.to_string(),
                    price: price.parse().expect("catalog price is a valid decimal"),
                    duration_minutes,
                })
                .collect(),
        }
    }
}

impl ServiceCatalog {
    /// Case-insensitive lookup by service name.
    pub fn find(&self, name: &str) -> Option<&SalonService> {
        self.services
            .iter()
            .find(|service| service.name.eq_ignore_ascii_case(name.trim()))
    }

    /// One-line menu summary for chat replies.
    pub fn menu_lines(&self) -> String {
        self.services
            .iter()
            .map(|service| {
                format!(
                    "• {} — ${:.2} ({} min)",
                    service.name, service.price, service.duration_minutes
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = ServiceCatalog::default();
        let service = catalog.find("hair coloring").expect("known service");
        assert_eq!(service.price, "120.00".parse().unwrap());
        assert!(catalog.find("  HAIRCUT ").is_some());
    }

    #[test]
    fn unknown_service_is_none() {
        assert!(ServiceCatalog::default().find("Beard Trim").is_none());
    }

    #[test]
    fn menu_lists_every_service() {
        let catalog = ServiceCatalog::default();
        let menu = catalog.menu_lines();
        for service in &catalog.services {
            assert!(menu.contains(&service.name));
        }
    }
}

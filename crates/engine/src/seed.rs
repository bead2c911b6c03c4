//! Synthetic data for local testing
//!
//! [`Seeder`] fills the four built-in collections with plausible rows:
//! clients first, then contacts and contracts that reference them, then
//! users. Every identifier is drawn from the seeded RNG, so seeding twice
//! with the same seed overwrites the same rows instead of duplicating them.

use crate::backend::Backend;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use roster_core::{Collection, Record, RecordId, RosterResult, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Builder;

const FIRST_NAMES: &[&str] = &[
    "Jean", "Marie", "Robert", "Sophie", "Michel", "Julie", "Pierre", "Isabelle", "François",
    "Nathalie", "Luc", "Geneviève", "André", "Chantal", "Éric", "Mélanie",
];

const LAST_NAMES: &[&str] = &[
    "Tremblay", "Lavoie", "Gagnon", "Bergeron", "Côté", "Lemieux", "Bouchard", "Roy", "Morin",
    "Dubois", "Gauthier", "Pelletier", "Bélanger", "Lévesque", "Fortin", "Ouellet",
];

const COMPANY_KINDS: &[&str] = &[
    "Constructions", "Boutique", "Restaurants", "Technologies", "Designs", "Consultants",
    "Clinique", "Immobilier", "Transport", "Entretien",
];

const CITIES: &[(&str, &str)] = &[
    ("Montréal", "H2X 1Y6"),
    ("Québec", "G1K 3B2"),
    ("Sherbrooke", "J1H 5H1"),
    ("Gatineau", "J8X 2J3"),
    ("Trois-Rivières", "G9A 4X3"),
    ("Laval", "H7N 2K1"),
];

const STREETS: &[&str] = &[
    "Rue Principale", "Boulevard St-Laurent", "Avenue du Parc", "Rue Wellington", "Rue King",
    "Avenue Mont-Royal", "Rue Notre-Dame", "Rue Sherbrooke",
];

const PAYMENT_TERMS: &[&str] = &["Net 15", "Net 30", "Net 45", "Net 60"];
const CONTRACT_STATUSES: &[&str] = &["draft", "active", "completed", "cancelled"];
const UNITS: &[&str] = &["hour", "day", "week", "month", "fixed"];
const ROLES: &[&str] = &["admin", "manager", "employee"];
const POSITIONS: &[&str] = &["Directeur", "Comptable", "Technicien", "Coordonnatrice", "Agent"];

/// Number of rows written per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Client rows
    pub clients: usize,
    /// Contact rows
    pub contacts: usize,
    /// Contract rows
    pub contracts: usize,
    /// User rows
    pub users: usize,
}

impl SeedReport {
    /// Rows written in total
    pub fn total(&self) -> usize {
        self.clients + self.contacts + self.contracts + self.users
    }
}

/// Deterministic synthetic row generator
pub struct Seeder {
    rng: StdRng,
    clients: usize,
    users: usize,
    today: NaiveDate,
}

impl Seeder {
    /// Create a seeder with 10 clients and 8 users
    pub fn new(seed: u64) -> Self {
        Seeder {
            rng: StdRng::seed_from_u64(seed),
            clients: 10,
            users: 8,
            today: Utc::now().date_naive(),
        }
    }

    /// Change the number of clients (builder pattern)
    pub fn clients(mut self, n: usize) -> Self {
        self.clients = n;
        self
    }

    /// Change the number of users (builder pattern)
    pub fn users(mut self, n: usize) -> Self {
        self.users = n;
        self
    }

    /// Write every collection through `backend.upsert`
    pub fn seed_all<B: Backend + ?Sized>(&mut self, backend: &B) -> RosterResult<SeedReport> {
        let mut report = SeedReport::default();

        let clients = Collection::new(Collection::CLIENTS);
        let contacts = Collection::new(Collection::CONTACTS);
        let contracts = Collection::new(Collection::CONTRACTS);
        let users = Collection::new(Collection::USERS);

        for _ in 0..self.clients {
            let client = self.client();
            backend.upsert(&clients, client.clone())?;
            report.clients += 1;

            let mut contact_ids = Vec::new();
            for _ in 0..self.rng.gen_range(0..=2) {
                let contact = self.contact(client.id());
                contact_ids.push(contact.id().clone());
                backend.upsert(&contacts, contact)?;
                report.contacts += 1;
            }

            for n in 1..=self.rng.gen_range(1..=3) {
                let contract = self.contract(&client, &contact_ids, n);
                backend.upsert(&contracts, contract)?;
                report.contracts += 1;
            }
        }

        for _ in 0..self.users {
            backend.upsert(&users, self.user())?;
            report.users += 1;
        }

        debug!(target: "roster::seed", total = report.total(), "seeded collections");
        Ok(report)
    }

    fn id(&mut self) -> RecordId {
        let bytes: [u8; 16] = self.rng.gen();
        RecordId::new(Builder::from_random_bytes(bytes).into_uuid().to_string())
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn phone(&mut self) -> String {
        format!(
            "{}-{}-{}",
            self.rng.gen_range(100..1000),
            self.rng.gen_range(100..1000),
            self.rng.gen_range(1000..10000)
        )
    }

    fn client(&mut self) -> Record {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let kind = self.pick(COMPANY_KINDS);
        let (city, postal_code) = *CITIES.choose(&mut self.rng).unwrap_or(&CITIES[0]);
        let street = self.pick(STREETS);
        let active = self.rng.gen_bool(0.8);

        let apartment = if self.rng.gen_bool(0.5) {
            Value::from(format!("Suite {}", self.rng.gen_range(1..9) * 100))
        } else {
            Value::Null
        };
        let discount = [0i64, 0, 50, 75, 100]
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(0);

        Record::new(self.id())
            .with("name", format!("{} {}", first, last))
            .with("company_name", format!("{} {}", kind, last))
            .with("alias", last)
            .with("active", active)
            .with("address", format!("{} {}", self.rng.gen_range(100..1000), street))
            .with("apartment", apartment)
            .with("city", city)
            .with("province", "QC")
            .with("postal_code", postal_code)
            .with("country", "Canada")
            .with("payment_terms", self.pick(PAYMENT_TERMS))
            .with("discount_amount", discount)
            .with(
                "electronic_payment_discount_percent",
                f64::from(self.rng.gen_range(0..=6u32)) * 0.5,
            )
            .with(
                "reason",
                if active {
                    Value::Null
                } else {
                    Value::from("Inactive account")
                },
            )
    }

    fn contact(&mut self, client_id: &RecordId) -> Record {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let email = format!(
            "{}.{}@example.com",
            roster_core::value::collation_key(first),
            roster_core::value::collation_key(last)
        );
        Record::new(self.id())
            .with("client_id", client_id.as_str())
            .with("first_name", first)
            .with("last_name", last)
            .with("email", email)
            .with("position", self.pick(POSITIONS))
            .with("office_phone", self.phone())
            .with("language", if self.rng.gen_bool(0.7) { "fr" } else { "en" })
            .with("active", true)
    }

    fn contract(&mut self, client: &Record, contact_ids: &[RecordId], n: u32) -> Record {
        let start = self.today - Duration::days(self.rng.gen_range(0..180));
        let end = start + Duration::days(self.rng.gen_range(30..395));
        let status = self.pick(CONTRACT_STATUSES);
        let price = self.rng.gen_range(50..5000i64);
        let cost = (price as f64 * self.rng.gen_range(0.3..0.7)).floor();
        let owner = client
            .get("company_name")
            .or_else(|| client.get("name"))
            .map(Value::to_string)
            .unwrap_or_default();
        let contact = contact_ids
            .choose(&mut self.rng)
            .map(|id| Value::from(id.as_str()))
            .unwrap_or(Value::Null);

        Record::new(self.id())
            .with("client_id", client.id().as_str())
            .with("contact_id", contact)
            .with("alias", format!("Contrat {} {}", owner, n))
            .with("start_date", start.format("%Y-%m-%d").to_string())
            .with("end_date", end.format("%Y-%m-%d").to_string())
            .with("price", price)
            .with("price_unit", self.pick(UNITS))
            .with("billing_unit", self.pick(UNITS))
            .with("cost", cost)
            .with("status", status)
            .with("language", if self.rng.gen_bool(0.7) { "fr" } else { "en" })
            .with("entry_method", "manual")
            .with("notes", format!("Notes pour le contrat {} de {}", n, owner))
            .with("active", status != "cancelled")
    }

    fn user(&mut self) -> Record {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let (city, postal_code) = *CITIES.choose(&mut self.rng).unwrap_or(&CITIES[0]);
        Record::new(self.id())
            .with("first_name", first)
            .with("last_name", last)
            .with("role", self.pick(ROLES))
            .with("position", self.pick(POSITIONS))
            .with("city", city)
            .with("postal_code", postal_code)
            .with("province", "QC")
            .with("country", "Canada")
            .with("mobile_phone", self.phone())
            .with("language", if self.rng.gen_bool(0.7) { "fr" } else { "en" })
            .with("years_of_experience", self.rng.gen_range(0..25i64))
            .with("locationless", self.rng.gen_bool(0.2))
            .with("active", self.rng.gen_bool(0.85))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ListQuery;
    use crate::Database;

    #[test]
    fn test_seed_counts() {
        let db = Database::cache().unwrap();
        let report = Seeder::new(1).clients(4).users(3).seed_all(db.as_ref()).unwrap();
        assert_eq!(report.clients, 4);
        assert_eq!(report.users, 3);
        assert!(report.contracts >= 4 && report.contracts <= 12);
        assert_eq!(db.count(&Collection::new(Collection::CLIENTS)), 4);
        assert_eq!(report.total(), 4 + 3 + report.contacts + report.contracts);
    }

    #[test]
    fn test_reseed_same_seed_does_not_duplicate() {
        let db = Database::cache().unwrap();
        let first = db.seed(9).unwrap();
        db.seed(9).unwrap();
        assert_eq!(db.count(&Collection::new(Collection::CLIENTS)), first.clients);
        assert_eq!(
            db.count(&Collection::new(Collection::CONTRACTS)),
            first.contracts
        );
    }

    #[test]
    fn test_contracts_reference_existing_clients() {
        let db = Database::cache().unwrap();
        db.seed(5).unwrap();
        let clients = db
            .list(&Collection::new(Collection::CLIENTS), &ListQuery::new())
            .unwrap();
        let contracts = db
            .list(&Collection::new(Collection::CONTRACTS), &ListQuery::new())
            .unwrap();
        for contract in &contracts {
            let client_id = contract.get("client_id").and_then(Value::as_str).unwrap();
            assert!(clients.iter().any(|c| c.id().as_str() == client_id));
            let cancelled = contract.get("status") == Some(&Value::from("cancelled"));
            assert_eq!(contract.active(), Some(!cancelled));
        }
    }

    #[test]
    fn test_seeded_rows_pass_schema() {
        let db = Database::cache().unwrap();
        // upsert checks schemas, so success means every row is valid
        let report = db.seed(11).unwrap();
        assert!(report.total() > 0);
    }
}

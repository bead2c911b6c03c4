//! List page definitions for the built-in collections
//!
//! Column sets follow the dashboard tables. Page size and null placement
//! come from the database configuration.

use roster_core::Collection;
use roster_engine::RosterConfig;
use roster_view::{ColumnDef, ListConfig};

fn base(collection: &str, config: &RosterConfig) -> ListConfig {
    ListConfig::new(collection)
        .page_size(config.page_size)
        .null_order(config.null_order)
}

/// Clients table
pub fn clients(config: &RosterConfig) -> ListConfig {
    base(Collection::CLIENTS, config)
        .column(ColumnDef::text("name", "Name"))
        .column(ColumnDef::text("company_name", "Company"))
        .column(ColumnDef::text("alias", "Alias").hidden())
        .column(ColumnDef::text("city", "City"))
        .column(ColumnDef::text("payment_terms", "Payment terms"))
        .column(ColumnDef::number("discount_amount", "Discount").hidden())
        .column(ColumnDef::status("active", "Status"))
}

/// Contacts table
pub fn contacts(config: &RosterConfig) -> ListConfig {
    base(Collection::CONTACTS, config)
        .column(ColumnDef::text("first_name", "First name"))
        .column(ColumnDef::text("last_name", "Last name"))
        .column(ColumnDef::text("email", "Email"))
        .column(ColumnDef::text("position", "Position"))
        .column(ColumnDef::text("office_phone", "Phone").unsortable())
        .column(ColumnDef::text("language", "Language").hidden())
        .column(ColumnDef::status("active", "Status"))
}

/// Contracts table
pub fn contracts(config: &RosterConfig) -> ListConfig {
    base(Collection::CONTRACTS, config)
        .column(ColumnDef::text("alias", "Contract"))
        .column(ColumnDef::date("start_date", "Start"))
        .column(ColumnDef::date("end_date", "End"))
        .column(ColumnDef::number("price", "Price"))
        .column(ColumnDef::text("price_unit", "Unit"))
        .column(ColumnDef::number("cost", "Cost").hidden())
        .column(ColumnDef::text("status", "Stage"))
        .column(ColumnDef::status("active", "Status"))
        .search_fields(&["alias", "status", "notes", "price_unit"])
}

/// Users table
pub fn users(config: &RosterConfig) -> ListConfig {
    base(Collection::USERS, config)
        .column(ColumnDef::text("first_name", "First name"))
        .column(ColumnDef::text("last_name", "Last name"))
        .column(ColumnDef::text("role", "Role"))
        .column(ColumnDef::text("position", "Position"))
        .column(ColumnDef::text("city", "City"))
        .column(ColumnDef::text("mobile_phone", "Mobile").unsortable())
        .column(ColumnDef::status("active", "Status"))
}

/// Page definition for a built-in collection
pub fn page_for(collection: &Collection, config: &RosterConfig) -> Option<ListConfig> {
    match collection.as_str() {
        Collection::CLIENTS => Some(clients(config)),
        Collection::CONTACTS => Some(contacts(config)),
        Collection::CONTRACTS => Some(contracts(config)),
        Collection::USERS => Some(users(config)),
        _ => None,
    }
}

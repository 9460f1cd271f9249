//! Analytics core for the MeatBags wallet dashboard.
//!
//! Pure computations over already-fetched holdings, transactions and badge
//! feeds: prep-point yields, counterparty interactions and their bubble
//! layout, GeoCache stats and loserboard scoring.

pub mod badges;
pub mod config;
pub mod core;
pub mod geocache;
pub mod interactions;
pub mod layout;
pub mod masks;
pub mod prep;
pub mod report;
pub mod snapshot;

//! Mappers for DAO proposals and treasury transactions.
//!
//! Treasury amounts are stored as numeric text so no precision is lost in
//! the database; the application works with numbers. The transform is
//! registered as a custom mapping in each direction.

use shared::{DaoProposal, DaoProposalRow, TreasuryTransaction, TreasuryTransactionRow};

use super::{number_to_numeric_text, numeric_text_to_number, EntityMapper};
use crate::domain::MapperConfig;

pub struct DaoProposalMapper;

impl EntityMapper for DaoProposalMapper {
    type Row = DaoProposalRow;
    type Model = DaoProposal;

    const NAME: &'static str = "dao_proposal";
    const DATE_FIELDS: &'static [&'static str] = &["votingEndsAt", "createdAt", "updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["options"];
}

pub struct TreasuryTransactionMapper;

impl EntityMapper for TreasuryTransactionMapper {
    type Row = TreasuryTransactionRow;
    type Model = TreasuryTransaction;

    const NAME: &'static str = "treasury_transaction";
    const DATE_FIELDS: &'static [&'static str] = &["date", "createdAt"];
    const JSON_FIELDS: &'static [&'static str] = &["metadata"];

    fn read_config() -> MapperConfig {
        Self::declared_config().with_custom_mapping("amount", numeric_text_to_number)
    }

    fn write_config() -> MapperConfig {
        Self::declared_config().with_custom_mapping("amount", number_to_numeric_text)
    }
}

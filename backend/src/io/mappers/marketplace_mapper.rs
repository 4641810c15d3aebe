//! Mapper for marketplace listings.

use shared::{MarketplaceListing, MarketplaceListingRow};

use super::{number_to_numeric_text, numeric_text_to_number, EntityMapper};
use crate::domain::MapperConfig;

pub struct MarketplaceListingMapper;

impl EntityMapper for MarketplaceListingMapper {
    type Row = MarketplaceListingRow;
    type Model = MarketplaceListing;

    const NAME: &'static str = "marketplace_listing";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["images"];

    fn read_config() -> MapperConfig {
        Self::declared_config().with_custom_mapping("price", numeric_text_to_number)
    }

    fn write_config() -> MapperConfig {
        Self::declared_config().with_custom_mapping("price", number_to_numeric_text)
    }
}

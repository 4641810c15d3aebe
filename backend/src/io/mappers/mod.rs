//! # Entity Mappers
//!
//! One mapper per entity, converting between the typed storage row and the
//! typed application model from the `shared` crate. Every mapper only
//! declares its date fields, JSON fields and custom transforms; the actual
//! conversion always goes through [`RecordMapper`].

pub mod dao_mapper;
pub mod event_mapper;
pub mod learning_mapper;
pub mod marketplace_mapper;
pub mod media_mapper;
pub mod profile_mapper;
pub mod report_mapper;
pub mod social_mapper;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Number;

use crate::domain::{to_camel_case, FieldValue, MapperConfig, MappingResult, Record, RecordMapper};

pub use dao_mapper::{DaoProposalMapper, TreasuryTransactionMapper};
pub use event_mapper::{EventMapper, EventRsvpMapper};
pub use learning_mapper::{CertificateMapper, CourseEnrollmentMapper, CourseMapper};
pub use marketplace_mapper::MarketplaceListingMapper;
pub use media_mapper::{FileUploadMapper, PhotoMapper};
pub use profile_mapper::{BusinessMapper, ProfileMapper, UserSettingsMapper};
pub use report_mapper::AnalyticsReportMapper;
pub use social_mapper::{BookmarkMapper, CommentMapper, PostMapper};

/// Declarative mapping between an entity's storage row and its model.
pub trait EntityMapper {
    type Row: Serialize + DeserializeOwned + Default;
    type Model: Serialize + DeserializeOwned;

    /// Name used in settings files and on the command line.
    const NAME: &'static str;
    /// Application-side names of the date fields.
    const DATE_FIELDS: &'static [&'static str] = &[];
    /// Application-side names of the JSON fields.
    const JSON_FIELDS: &'static [&'static str] = &[];

    fn record_mapper() -> RecordMapper {
        RecordMapper::default()
    }

    /// Date and JSON declarations without any custom transforms.
    fn declared_config() -> MapperConfig {
        MapperConfig::new()
            .with_date_fields(Self::DATE_FIELDS.iter().copied())
            .with_json_fields(Self::JSON_FIELDS.iter().copied())
    }

    /// Config used when reading rows.
    fn read_config() -> MapperConfig {
        Self::declared_config()
    }

    /// Config used when building write payloads.
    fn write_config() -> MapperConfig {
        Self::declared_config()
    }

    fn to_model(row: &Self::Row) -> MappingResult<Self::Model> {
        let record = Record::from_serialize(row)?;
        Self::record_mapper()
            .to_application(&record, &Self::read_config())?
            .deserialize_into()
    }

    fn to_row(model: &Self::Model) -> MappingResult<Self::Row> {
        let record = Record::from_serialize(model)?;
        Self::record_mapper()
            .to_storage(&record, &Self::write_config())?
            .deserialize_into()
    }

    fn to_models(rows: &[Self::Row]) -> MappingResult<Vec<Self::Model>> {
        rows.iter().map(Self::to_model).collect()
    }

    fn to_rows(models: &[Self::Model]) -> MappingResult<Vec<Self::Row>> {
        models.iter().map(Self::to_row).collect()
    }

    /// Declared field names that do not exist on the row shape.
    ///
    /// An undeclared date or JSON field is passed through as raw text, so a
    /// typo here only shows up later as a type mismatch. An empty result means
    /// every declaration names a real column.
    fn verify_declared_fields() -> Vec<String> {
        let columns: BTreeSet<String> = match Record::from_serialize(&Self::Row::default()) {
            Ok(record) => record.keys().map(to_camel_case).collect(),
            Err(_) => BTreeSet::new(),
        };

        let read = Self::read_config();
        let write = Self::write_config();
        let declared: BTreeSet<&String> = read
            .date_fields
            .iter()
            .chain(read.json_fields.iter())
            .chain(read.custom_mappings.keys())
            .chain(write.custom_mappings.keys())
            .collect();

        declared
            .into_iter()
            .filter(|field| !columns.contains(*field))
            .cloned()
            .collect()
    }
}

/// Parse numeric text ("19.99") into a number. Anything else is returned as is.
pub(crate) fn numeric_text_to_number(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or_else(|| value.clone(), FieldValue::Number),
        other => other.clone(),
    }
}

/// Render a number back to numeric text. Anything else is returned as is.
pub(crate) fn number_to_numeric_text(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(n) => FieldValue::String(n.to_string()),
        other => other.clone(),
    }
}

/// Everything needed to map one entity without knowing its typed shapes.
#[derive(Debug, Clone)]
pub struct EntityProfile {
    pub name: &'static str,
    pub record_mapper: RecordMapper,
    pub read_config: MapperConfig,
    pub write_config: MapperConfig,
    pub undeclared_fields: Vec<String>,
}

fn profile_of<M: EntityMapper>() -> EntityProfile {
    EntityProfile {
        name: M::NAME,
        record_mapper: M::record_mapper(),
        read_config: M::read_config(),
        write_config: M::write_config(),
        undeclared_fields: M::verify_declared_fields(),
    }
}

/// Registry of every entity with a mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Profile,
    Business,
    UserSettings,
    Post,
    Comment,
    Bookmark,
    Event,
    EventRsvp,
    Course,
    CourseEnrollment,
    Certificate,
    DaoProposal,
    TreasuryTransaction,
    MarketplaceListing,
    Photo,
    FileUpload,
    AnalyticsReport,
}

impl EntityKind {
    pub const ALL: [EntityKind; 17] = [
        EntityKind::Profile,
        EntityKind::Business,
        EntityKind::UserSettings,
        EntityKind::Post,
        EntityKind::Comment,
        EntityKind::Bookmark,
        EntityKind::Event,
        EntityKind::EventRsvp,
        EntityKind::Course,
        EntityKind::CourseEnrollment,
        EntityKind::Certificate,
        EntityKind::DaoProposal,
        EntityKind::TreasuryTransaction,
        EntityKind::MarketplaceListing,
        EntityKind::Photo,
        EntityKind::FileUpload,
        EntityKind::AnalyticsReport,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Profile => ProfileMapper::NAME,
            EntityKind::Business => BusinessMapper::NAME,
            EntityKind::UserSettings => UserSettingsMapper::NAME,
            EntityKind::Post => PostMapper::NAME,
            EntityKind::Comment => CommentMapper::NAME,
            EntityKind::Bookmark => BookmarkMapper::NAME,
            EntityKind::Event => EventMapper::NAME,
            EntityKind::EventRsvp => EventRsvpMapper::NAME,
            EntityKind::Course => CourseMapper::NAME,
            EntityKind::CourseEnrollment => CourseEnrollmentMapper::NAME,
            EntityKind::Certificate => CertificateMapper::NAME,
            EntityKind::DaoProposal => DaoProposalMapper::NAME,
            EntityKind::TreasuryTransaction => TreasuryTransactionMapper::NAME,
            EntityKind::MarketplaceListing => MarketplaceListingMapper::NAME,
            EntityKind::Photo => PhotoMapper::NAME,
            EntityKind::FileUpload => FileUploadMapper::NAME,
            EntityKind::AnalyticsReport => AnalyticsReportMapper::NAME,
        }
    }

    pub fn profile(self) -> EntityProfile {
        match self {
            EntityKind::Profile => profile_of::<ProfileMapper>(),
            EntityKind::Business => profile_of::<BusinessMapper>(),
            EntityKind::UserSettings => profile_of::<UserSettingsMapper>(),
            EntityKind::Post => profile_of::<PostMapper>(),
            EntityKind::Comment => profile_of::<CommentMapper>(),
            EntityKind::Bookmark => profile_of::<BookmarkMapper>(),
            EntityKind::Event => profile_of::<EventMapper>(),
            EntityKind::EventRsvp => profile_of::<EventRsvpMapper>(),
            EntityKind::Course => profile_of::<CourseMapper>(),
            EntityKind::CourseEnrollment => profile_of::<CourseEnrollmentMapper>(),
            EntityKind::Certificate => profile_of::<CertificateMapper>(),
            EntityKind::DaoProposal => profile_of::<DaoProposalMapper>(),
            EntityKind::TreasuryTransaction => profile_of::<TreasuryTransactionMapper>(),
            EntityKind::MarketplaceListing => profile_of::<MarketplaceListingMapper>(),
            EntityKind::Photo => profile_of::<PhotoMapper>(),
            EntityKind::FileUpload => profile_of::<FileUploadMapper>(),
            EntityKind::AnalyticsReport => profile_of::<AnalyticsReportMapper>(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
            format!("Unknown entity '{}', expected one of: {}", s, known.join(", "))
        })
    }
}

//! Mappers for photos and uploaded files.

use shared::{FileUpload, FileUploadRow, Photo, PhotoRow};

use super::EntityMapper;
use crate::domain::{BuiltinFields, RecordMapper};

pub struct PhotoMapper;

impl EntityMapper for PhotoMapper {
    type Row = PhotoRow;
    type Model = Photo;

    const NAME: &'static str = "photo";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt"];
    const JSON_FIELDS: &'static [&'static str] = &["metadata"];
}

pub struct FileUploadMapper;

impl EntityMapper for FileUploadMapper {
    type Row = FileUploadRow;
    type Model = FileUpload;

    const NAME: &'static str = "file_upload";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt"];

    /// `data` is base64 file content here, not JSON.
    fn record_mapper() -> RecordMapper {
        RecordMapper::new(BuiltinFields::standard().without_json_field("data"))
    }
}

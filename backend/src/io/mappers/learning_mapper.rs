//! Mappers for courses, enrollments and completion certificates.

use shared::{
    Certificate, CertificateRow, Course, CourseEnrollment, CourseEnrollmentRow, CourseRow,
};

use super::EntityMapper;

pub struct CourseMapper;

impl EntityMapper for CourseMapper {
    type Row = CourseRow;
    type Model = Course;

    const NAME: &'static str = "course";
    const DATE_FIELDS: &'static [&'static str] = &["publishedAt", "createdAt", "updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["modules"];
}

pub struct CourseEnrollmentMapper;

impl EntityMapper for CourseEnrollmentMapper {
    type Row = CourseEnrollmentRow;
    type Model = CourseEnrollment;

    const NAME: &'static str = "course_enrollment";
    const DATE_FIELDS: &'static [&'static str] = &["enrolledAt", "completedAt"];
}

pub struct CertificateMapper;

impl EntityMapper for CertificateMapper {
    type Row = CertificateRow;
    type Model = Certificate;

    const NAME: &'static str = "certificate";
    const DATE_FIELDS: &'static [&'static str] = &["issuedAt"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_unpublished_course() {
        let row = CourseRow {
            id: "course-1".to_string(),
            instructor_id: "user-9".to_string(),
            title: "Bookkeeping for Small Businesses".to_string(),
            description: None,
            modules: Some("[{\"title\":\"Cash flow\",\"lessons\":4}]".to_string()),
            is_published: false,
            published_at: None,
            created_at: "2024-02-01T00:00:00Z".to_string(),
            updated_at: "2024-02-03T00:00:00Z".to_string(),
        };

        let course = CourseMapper::to_model(&row).unwrap();
        assert_eq!(course.published_at, None);
        assert_eq!(course.modules, Some(json!([{"title": "Cash flow", "lessons": 4}])));
        assert_eq!(CourseMapper::to_row(&course).unwrap(), row);
    }

    #[test]
    fn test_enrollment_progress_and_completion() {
        let row = CourseEnrollmentRow {
            id: "enr-1".to_string(),
            course_id: "course-1".to_string(),
            user_id: "user-2".to_string(),
            progress: 0.75,
            enrolled_at: "2024-02-10T00:00:00Z".to_string(),
            completed_at: Some(String::new()),
        };

        let enrollment = CourseEnrollmentMapper::to_model(&row).unwrap();
        assert_eq!(enrollment.progress, 0.75);
        // Empty text in a date column reads as "not completed".
        assert_eq!(enrollment.completed_at, None);
        assert_eq!(
            enrollment.enrolled_at,
            Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_certificate_bidirectional_conversion() {
        let row = CertificateRow {
            id: "cert-1".to_string(),
            enrollment_id: "enr-1".to_string(),
            user_id: "user-2".to_string(),
            certificate_url: Some("https://cdn.example.com/cert-1.pdf".to_string()),
            issued_at: "2024-04-01T00:00:00Z".to_string(),
        };

        let certificate = CertificateMapper::to_model(&row).unwrap();
        assert_eq!(CertificateMapper::to_row(&certificate).unwrap(), row);
    }
}

pub mod integrity;
pub mod profile;
pub mod schema;
pub mod seed;

pub use integrity::{check_integrity, CatalogIssue};
pub use profile::UserProfile;
pub use schema::{
    Answer, CourseGroup, Direction, DirectionWeight, EnrollmentRecord, EnrollmentStatus,
    StatusParseError,
};
pub use seed::CatalogSeed;

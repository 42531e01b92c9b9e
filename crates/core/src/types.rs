/// List and list item primary keys are UUIDs generated by the application.
pub type DbId = uuid::Uuid;

/// User ids are issued by the auth service and stored as opaque text.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

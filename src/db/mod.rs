pub mod chatdb;
pub mod db;
pub mod jobdb;
pub mod notificationdb;
pub mod ratingdb;
pub mod userdb;

pub mod chatmodel;
pub mod jobmodel;
pub mod notificationmodel;
pub mod ratingmodel;
pub mod usermodel;

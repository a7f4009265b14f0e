pub mod chatdtos;
pub mod jobdtos;
pub mod ratingdtos;
pub mod userdtos;

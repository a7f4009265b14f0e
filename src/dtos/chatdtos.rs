use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{dtos::userdtos::FilterUserDto, models::chatmodel::Message};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub receiver_id: Uuid,

    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub status: String,
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponseDto {
    pub status: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ChatPartnersResponseDto {
    pub status: String,
    pub partners: Vec<FilterUserDto>,
}

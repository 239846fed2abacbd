use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct GuildMember {
    pub guild_id: String,
    pub id: String,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct GuildRole {
    pub guild_id: String,
    pub id: String,
    pub name: String,
}

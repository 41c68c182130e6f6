use crate::server::{data::session::SessionRepository, model::session::UpsertSessionParam};
use chrono::Utc;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod delete_expired;
mod find_live;
mod upsert;

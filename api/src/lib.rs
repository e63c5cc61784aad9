#![allow(dead_code, unused)]

pub mod client_ip;
pub mod config;
pub mod email_template;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod metrics;
pub mod metrics_handler;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod spam;
pub mod state;
pub mod validation;

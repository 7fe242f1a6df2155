mod admin;
mod application;
mod auth;
mod join;

mod auth_client;
mod helpers;
mod portal;

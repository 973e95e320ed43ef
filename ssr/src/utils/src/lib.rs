pub mod health;
pub mod veo;
pub mod web;
pub mod whatsapp;

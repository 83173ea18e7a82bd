//! HTTP-to-gRPC chat bridge for the Super Builder service

pub mod config;
pub mod connector;
pub mod pb;
pub mod web;

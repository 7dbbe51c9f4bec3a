//! Thermal systems models.
//!
//! This module contains models for networks of heat exchanger cells.

pub mod hx_network;

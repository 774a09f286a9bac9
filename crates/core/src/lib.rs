//! Core business logic for Brickyard.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `gst` - GST (CGST/SGST/IGST) tax calculation
//! - `stock` - Production batch stock arithmetic and validation
//! - `allocation` - Splitting sale line requests across production batches
//! - `invoice` - Invoice financial totals recomputation

pub mod allocation;
pub mod gst;
pub mod invoice;
pub mod stock;

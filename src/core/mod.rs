//! Core functionality
//!
//! This module contains the health probing logic and its data structures.

pub mod health;

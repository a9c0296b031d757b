//! Calendar availability core for assistant agents.
//!
//! Lists upcoming events, creates new ones and computes free time slots
//! inside a fixed 08:00-18:00 working-day window. The calendar store is
//! reached through the injectable [`backend::CalendarBackend`] trait;
//! the shipped implementation talks to Google Calendar.

pub mod backend;
pub mod calendar;
pub mod config;
pub mod error;
pub mod startup;

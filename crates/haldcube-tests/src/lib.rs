//! Cross-crate scenarios for haldcube.
//!
//! Generation, conversion and image I/O are exercised together here, at
//! the default 64³ level, instead of inside any single library crate.

#[cfg(test)]
mod round_trip;

#[cfg(test)]
mod files;

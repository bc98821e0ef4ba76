// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod rides;
pub mod summary;

pub use rides::RideService;
pub use summary::{
    CalculatorConfig, ChronologyPolicy, SpeedAggregation, SpeedFilter, SpeedFilterConfig,
    SummaryCalculator,
};

//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use courier::{Command, Handler, Outcome, Request, ValidationOutcome};

/// Simple request doubling its payload.
#[derive(Debug, Clone)]
pub struct Ping {
    pub n: i32,
}

impl Request for Ping {
    type Response = Outcome<i32>;
}

impl Command for Ping {}

pub struct EchoHandler;

impl Handler<Ping> for EchoHandler {
    async fn handle(&self, request: Ping) -> Outcome<i32> {
        Outcome::success(request.n * 2)
    }
}

/// Command with validation rules attached in most tests.
#[derive(Debug, Clone)]
pub struct CreateLocation {
    pub name: String,
    pub latitude: f64,
}

impl Request for CreateLocation {
    type Response = Outcome<String>;
}

impl Command for CreateLocation {}

pub struct CreateLocationHandler;

impl Handler<CreateLocation> for CreateLocationHandler {
    async fn handle(&self, request: CreateLocation) -> Outcome<String> {
        Outcome::success(format!("created {}", request.name))
    }
}

pub fn name_required(request: &CreateLocation) -> ValidationOutcome {
    if request.name.trim().is_empty() {
        ValidationOutcome::fail("name must not be blank")
    } else {
        ValidationOutcome::Valid
    }
}

pub fn latitude_in_range(request: &CreateLocation) -> ValidationOutcome {
    if (-90.0..=90.0).contains(&request.latitude) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::fail("latitude out of range")
    }
}

/// Event used by the bus tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickEvent {
    pub tick: u32,
}

impl courier::Event for TickEvent {}

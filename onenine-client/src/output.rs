use colored::*;
use std::time::Duration;

/// One value and how long after the request it reached the client
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub value: u32,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct RunResult {
    pub endpoint: String,
    pub arrivals: Vec<Arrival>,
    pub total: Duration,
}

impl RunResult {
    pub fn first_arrival(&self) -> Option<Duration> {
        self.arrivals.first().map(|arrival| arrival.elapsed)
    }

    pub fn values(&self) -> Vec<u32> {
        self.arrivals.iter().map(|arrival| arrival.value).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.values() == (1..=9).collect::<Vec<u32>>()
    }
}

pub fn print_arrival(endpoint_label: &str, arrival: &Arrival) {
    println!(
        "[{}] {:>6.2}s  {}",
        endpoint_label.bright_blue().bold(),
        arrival.elapsed.as_secs_f64(),
        arrival.value.to_string().yellow()
    );
}

pub fn print_summary(results: &[RunResult]) {
    println!("\n{}", "=== SUMMARY ===".bright_white().bold());

    for result in results {
        let status = if result.is_complete() {
            "OK".green().bold()
        } else {
            "INCOMPLETE".red().bold()
        };

        let first = result
            .first_arrival()
            .map(|first| format!("{:.2}s", first.as_secs_f64()))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "[{}] {}: first value after {}, all {} after {:.2}s",
            status,
            result.endpoint,
            first,
            result.arrivals.len(),
            result.total.as_secs_f64()
        );
    }
}

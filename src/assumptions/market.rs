//! Addressable market: population growth and flu incidence by projection year

/// Project the population for years `0..n_years`, compounding annually from
/// the base year (year 0 = `base_population`)
pub fn project_population(base_population: f64, growth_rate: f64, n_years: usize) -> Vec<f64> {
    (0..n_years)
        .map(|year| base_population * (1.0 + growth_rate).powi(year as i32))
        .collect()
}

/// Number of people contracting flu in each year
pub fn flu_incidence(population: &[f64], flu_rate: f64) -> Vec<f64> {
    population.iter().map(|p| flu_rate * p).collect()
}

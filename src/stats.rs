use crate::models::{AggregateResult, SurveyResponse};

/// Attach percentage for an `otc_frecuencia` label; unknown labels map to `None`.
pub fn map_attach(frequency: &str) -> Option<f64> {
    match frequency.to_lowercase().as_str() {
        "sí, casi siempre" | "si, casi siempre" => Some(80.0),
        "a veces" => Some(50.0),
        "rara vez" => Some(20.0),
        "nunca" => Some(0.0),
        _ => None,
    }
}

pub fn psm_midpoint(response: &SurveyResponse) -> Option<f64> {
    let barato = response.number("psm_barato")?;
    let caro = response.number("psm_caro")?;
    (barato > 0.0 && caro > 0.0).then(|| (barato + caro) / 2.0)
}

pub fn attach_rate(response: &SurveyResponse) -> Option<f64> {
    response.text("otc_frecuencia").and_then(map_attach)
}

/// A blank spend answer counts as zero spend.
pub fn otc_spend(response: &SurveyResponse) -> Option<f64> {
    let spend = match response.text("otc_gasto") {
        Some(raw) if raw.trim().is_empty() => 0.0,
        _ => response.number("otc_gasto")?,
    };
    (spend >= 0.0).then_some(spend)
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn finish(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Averages each field over the responses where that field is valid.
///
/// A response with one bad field still counts toward `n` and the other two averages.
pub fn aggregate_surveys(responses: &[SurveyResponse]) -> AggregateResult {
    let mut psm = Mean::default();
    let mut attach = Mean::default();
    let mut otc = Mean::default();

    for response in responses {
        psm.push(psm_midpoint(response));
        attach.push(attach_rate(response));
        otc.push(otc_spend(response));
    }

    AggregateResult {
        n: responses.len(),
        psm_avg: psm.finish(),
        attach_avg: attach.finish(),
        otc_avg: otc.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_attach_matches_labels_case_insensitively() {
        assert_eq!(map_attach("Sí, casi siempre"), Some(80.0));
        assert_eq!(map_attach("SÍ, CASI SIEMPRE"), Some(80.0));
        assert_eq!(map_attach("si, casi siempre"), Some(80.0));
        assert_eq!(map_attach("A VECES"), Some(50.0));
        assert_eq!(map_attach("Rara vez"), Some(20.0));
        assert_eq!(map_attach("Nunca"), Some(0.0));
        assert_eq!(map_attach("casi siempre"), None);
        assert_eq!(map_attach(""), None);
    }

    #[test]
    fn mean_skips_missing_values() {
        let mut mean = Mean::default();
        assert_eq!(mean.finish(), None);

        mean.push(None);
        assert_eq!(mean.finish(), None);

        mean.push(Some(10.0));
        mean.push(None);
        mean.push(Some(0.0));
        mean.push(Some(20.0));
        assert_eq!(mean.finish(), Some(10.0));
    }
}

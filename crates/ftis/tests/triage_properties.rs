use chrono::{TimeZone, Utc};
use ftis::triage::{
    diagnoses, diagnosis_distribution, explanations, recommendation, score, PatientObservation,
    TriageEngine, TriageLevel, FALLBACK_RECOMMENDATION, MAX_DIAGNOSES, MAX_EXPLANATIONS,
    MAX_SCORE, MIN_SCORE,
};
use proptest::prelude::*;

fn observation_strategy() -> impl Strategy<Value = PatientObservation> {
    (
        (35.0..43.0_f64, 0u32..30),
        proptest::collection::vec(any::<bool>(), FLAG_COUNT),
        proptest::option::of(0u32..500),
    )
        .prop_map(|((temperature, duration_days), flags, platelet_count)| {
            PatientObservation {
                headache: flags[0],
                body_pain: flags[1],
                rash: flags[2],
                nausea_vomiting: flags[3],
                breathing_difficulty: flags[4],
                platelet_count,
                travel_history: flags[5],
                mosquito_exposure: flags[6],
                ..PatientObservation::new(temperature, duration_days)
            }
        })
}

const FLAG_COUNT: usize = 7;

fn raise_flag(observation: &mut PatientObservation, flag: usize) {
    match flag {
        0 => observation.headache = true,
        1 => observation.body_pain = true,
        2 => observation.rash = true,
        3 => observation.nausea_vomiting = true,
        4 => observation.breathing_difficulty = true,
        5 => observation.travel_history = true,
        _ => observation.mosquito_exposure = true,
    }
}

proptest! {
    #[test]
    fn score_stays_within_bounds(observation in observation_strategy()) {
        let value = score(&observation);
        prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&value));
    }

    #[test]
    fn score_never_drops_as_temperature_or_duration_rise(
        observation in observation_strategy(),
        extra_degrees in 0.0..5.0_f64,
        extra_days in 0u32..20,
    ) {
        let base = score(&observation);
        let hotter = PatientObservation {
            temperature: observation.temperature + extra_degrees,
            ..observation.clone()
        };
        let longer = PatientObservation {
            duration_days: observation.duration_days + extra_days,
            ..observation.clone()
        };
        prop_assert!(score(&hotter) >= base);
        prop_assert!(score(&longer) >= base);
    }

    #[test]
    fn score_never_drops_when_a_flag_is_set(
        observation in observation_strategy(),
        flag in 0usize..FLAG_COUNT,
    ) {
        let mut flagged = observation.clone();
        raise_flag(&mut flagged, flag);
        prop_assert!(score(&flagged) >= score(&observation));
    }

    #[test]
    fn distribution_sums_to_one(observation in observation_strategy()) {
        let total: f64 = diagnosis_distribution(&observation)
            .iter()
            .map(|diagnosis| diagnosis.probability)
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn diagnoses_are_short_and_descending(observation in observation_strategy()) {
        let ranked = diagnoses(&observation);
        prop_assert!(ranked.len() <= MAX_DIAGNOSES);
        prop_assert!(ranked
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
    }

    #[test]
    fn explanations_are_positive_short_and_descending(observation in observation_strategy()) {
        let ranked = explanations(&observation);
        prop_assert!(ranked.len() <= MAX_EXPLANATIONS);
        prop_assert!(ranked.iter().all(|impact| impact.impact > 0.0));
        prop_assert!(ranked.windows(2).all(|pair| pair[0].impact >= pair[1].impact));
    }

    #[test]
    fn unknown_levels_fall_back(level in "[a-z]{0,12}") {
        prop_assume!(level.parse::<TriageLevel>().is_err());
        prop_assert_eq!(recommendation(&level), FALLBACK_RECOMMENDATION);
    }
}

#[test]
fn recommendation_is_stable_per_level() {
    for level in TriageLevel::ALL {
        let first = recommendation(level.label());
        assert_eq!(first, recommendation(level.label()));
        assert_ne!(first, FALLBACK_RECOMMENDATION);
    }
}

#[test]
fn critical_example_clamps_to_twenty() {
    let observation = PatientObservation {
        headache: true,
        body_pain: true,
        nausea_vomiting: true,
        breathing_difficulty: true,
        platelet_count: Some(80),
        travel_history: true,
        mosquito_exposure: true,
        ..PatientObservation::new(40.5, 5)
    };
    let submitted_at = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    let result = TriageEngine::new().assess(&observation, submitted_at);
    assert_eq!(result.score, 20);
    assert_eq!(result.level, TriageLevel::Critical);
}

#[test]
fn quiet_example_clamps_to_one() {
    let observation = PatientObservation {
        platelet_count: Some(280),
        ..PatientObservation::new(37.8, 2)
    };
    let result = TriageEngine::new().assess(&observation, Utc::now());
    assert_eq!(result.score, 1);
    assert_eq!(result.level, TriageLevel::Mild);
    assert!(result.suggested_tests.is_none());
}

use draw_core::{DrawConfig, Participant, PrizeTier, PrizeType};

/// `count` participants with ids `"1".."count"` and names `"P1".."Pcount"`
pub fn participants(count: usize) -> Vec<Participant> {
    (1..=count)
        .map(|i| Participant::new(i.to_string(), format!("P{i}")))
        .collect()
}

/// Look up a fixture participant by numeric id
pub fn participant(id: usize) -> Participant {
    Participant::new(id.to_string(), format!("P{id}"))
}

/// Placeholder tier plus three ranked tiers
pub fn sample_catalog() -> Vec<PrizeTier> {
    vec![
        PrizeTier::new(PrizeType::PLACEHOLDER, 0, "Special"),
        PrizeTier::new(1, 1, "First").with_title("Laptop"),
        PrizeTier::new(2, 2, "Second").with_title("Tablet"),
        PrizeTier::new(3, 3, "Third").with_title("Mug"),
    ]
}

/// Default config with the sample catalog and a short persistence timeout
pub fn test_config() -> DrawConfig {
    let mut config = DrawConfig {
        prizes: sample_catalog(),
        company: "Test Co".to_string(),
        ..DrawConfig::default()
    };
    config.session.persist_timeout_ms = 200;
    config
}

/// Roster source rows in spreadsheet shape: id, name, department
pub fn roster_rows(count: usize) -> Vec<Vec<String>> {
    (1..=count)
        .map(|i| vec![i.to_string(), format!("P{i}"), "Engineering".to_string()])
        .collect()
}

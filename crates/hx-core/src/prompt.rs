//! Builds the plan-generation prompt from an intake.

use serde::Serialize;

use crate::duration::{format_clock, format_duration, format_optional_duration};
use crate::intake::Intake;
use crate::priority::{Priority, rank_priorities};
use crate::station::Station;

/// Instruction placed ahead of every plan prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert Hyrox coach and training plan designer with deep knowledge of functional fitness, endurance training, and race-specific preparation. You create highly personalized, progressive training plans that help athletes achieve their Hyrox race goals.

Generate a complete, week-by-week Hyrox training plan in HTML format. The plan should be detailed, specific, and actionable. Use the exact HTML structure provided in the prompt.";

const PRIORITY_FOCUS_LIMIT: usize = 3;

/// Week boundaries of the five training phases (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingPhases {
    pub foundation_end: u32,
    pub build_start: u32,
    pub build_end: u32,
    pub intensity_start: u32,
    pub intensity_end: u32,
    pub peak_start: u32,
    pub peak_end: u32,
    pub taper_week: u32,
}

impl TrainingPhases {
    /// Splits a block of `weeks` into foundation (a quarter, at least two
    /// weeks), build (to 60%), intensity (to 85%), peak, and a final taper week.
    pub fn for_weeks(weeks: u32) -> Self {
        let foundation_end = (weeks / 4).max(2);
        let build_end = weeks * 3 / 5;
        let intensity_end = weeks * 17 / 20;
        Self {
            foundation_end,
            build_start: foundation_end + 1,
            build_end,
            intensity_start: build_end + 1,
            intensity_end,
            peak_start: intensity_end + 1,
            peak_end: weeks.saturating_sub(1),
            taper_week: weeks,
        }
    }
}

/// Builds the full prompt for a plan of `weeks` weeks.
pub fn build_prompt(intake: &Intake, weeks: u32) -> String {
    let weights = intake.division.weights();
    let phases = TrainingPhases::for_weeks(weeks);
    let priorities = rank_priorities(&intake.station_seconds());
    let division = division_label(intake);
    let equipment = equipment_list(intake);
    let target_5k = intake.effective_target_5k();

    let mut lines = Vec::new();
    lines.push("# Generate Hyrox Training Plan".to_string());
    lines.push(String::new());
    lines.push("## Athlete Information".to_string());
    lines.push(String::new());
    lines.push("### Race Information".to_string());
    lines.push(format!("- **Race Location:** {}", intake.race_location));
    lines.push(format!("- **Race Date:** {}", intake.race_date));
    lines.push(format!("- **Weeks Until Race:** {weeks}"));
    lines.push(format!("- **Race Division:** {division}"));
    lines.push("- **Race Weights:**".to_string());
    lines.push(format!("  - Sled Push: {}kg (including sled)", weights.sled_push));
    lines.push(format!("  - Sled Pull: {}kg (including sled)", weights.sled_pull));
    lines.push(format!(
        "  - Farmers Carry: {}kg each (2x = {}kg total)",
        weights.farmers_carry,
        weights.farmers_carry * 2
    ));
    lines.push(format!("  - Sandbag Lunges: {}kg", weights.sandbag_lunges));
    lines.push(format!("  - Wall Balls: {}kg", weights.wall_balls));
    lines.push(String::new());

    lines.push("### Current Performance".to_string());
    lines.push(timed_line("Current Race Time", intake.current_time.seconds()));
    lines.push(timed_line("Current 5K Time", intake.current_5k.seconds()));
    lines.push("- **Previous Race Station Times:**".to_string());
    let station_times = intake.station_seconds();
    for station in Station::ALL {
        lines.push(format!(
            "  - {}: {}",
            station.race_name(),
            format_optional_duration(station_times.get(&station).copied())
        ));
    }
    lines.push(String::new());

    lines.push("### Target Goals".to_string());
    lines.push(timed_line("Target Race Time", intake.target_time.seconds()));
    lines.push(target_5k.map_or_else(
        || "- **Target 5K Time:** N/A".to_string(),
        |seconds| timed_line("Target 5K Time", seconds),
    ));
    lines.push(timed_line("Time to Find", intake.time_to_find()));
    lines.push(String::new());

    if let Some(body) = body_composition(intake) {
        lines.push("### Body Composition Goals".to_string());
        lines.extend(body);
        lines.push(String::new());
    }

    lines.push("### Training Priorities (ranked by improvement potential)".to_string());
    if priorities.is_empty() {
        lines.push(
            "No previous race data provided. Focus on building all-around fitness.".to_string(),
        );
    } else {
        for (idx, priority) in priorities.iter().enumerate() {
            lines.push(format!(
                "{}. **{}** - Current: {}, Target: {}, Potential Savings: {}",
                idx + 1,
                priority.station.name(),
                format_clock(priority.current),
                format_clock(priority.target),
                format_clock(priority.savings)
            ));
        }
    }
    lines.push(String::new());

    lines.push("### Training Schedule Constraints".to_string());
    lines.push(format!("- **Running Days per Week:** {}", intake.run_days));
    lines.push(format!("- **Strength Days per Week:** {}", intake.strength_days));
    lines.push(format!(
        "- **Gym/Hyrox Equipment Days per Week:** {}",
        intake.gym_days
    ));
    lines.push(format!("- **Rest Days per Week:** {}", intake.rest_days()));
    lines.push(String::new());

    lines.push("### Available Equipment".to_string());
    lines.push(equipment.clone());
    lines.push(String::new());

    lines.push("## Training Plan Structure".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generate a complete {weeks}-week training plan with these phases:"
    ));
    lines.push(String::new());
    lines.extend(phase_lines(&phases));
    lines.push(String::new());

    lines.push("## Priority-Based Training Focus".to_string());
    lines.push(String::new());
    if priorities.is_empty() {
        lines.push("- Build all-around fitness with focus on Hyrox-specific movements".to_string());
    } else {
        lines.extend(
            priorities
                .iter()
                .take(PRIORITY_FOCUS_LIMIT)
                .map(priority_focus),
        );
    }
    lines.push(String::new());

    lines.push("## Station-Specific Targets".to_string());
    lines.push(String::new());
    for station in Station::ALL {
        lines.push(station_target_line(station));
    }
    lines.push(String::new());

    lines.push("## Instructions".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generate a complete {weeks}-week Hyrox training plan in HTML format for {division}. The plan should:"
    ));
    lines.push(String::new());
    lines.push("1. Be structured week-by-week with daily workouts".to_string());
    lines.push("2. Include specific exercises, sets, reps, and weights".to_string());
    lines.push("3. Progressively increase intensity and volume".to_string());
    lines.push("4. Focus on identified priorities".to_string());
    lines.push(format!("5. Adapt to available equipment: {equipment}"));
    lines.push(
        "6. Include proper periodization (foundation → build → intensity → peak → taper)"
            .to_string(),
    );
    lines.push(format!(
        "7. Account for training schedule: {} runs, {} strength, {} gym sessions per week",
        intake.run_days, intake.strength_days, intake.gym_days
    ));
    lines.push("8. Include transition practice".to_string());
    lines.push("9. Provide race-specific station work in gym sessions".to_string());
    lines.push(String::new());
    lines.push(OUTPUT_FORMAT.to_string());
    lines.push(String::new());
    lines.push("Generate the complete training plan now.".to_string());

    lines.join("\n")
}

const OUTPUT_FORMAT: &str = r#"### Output Format

Generate HTML that matches this structure for each week:

```html
<section class="week-section">
    <div class="week-header">
        <h2>Week {weekNumber}: {phaseName}</h2>
        <p>Focus: {focusDescription}</p>
    </div>

    <div class="day-card">
        <div class="day-header">
            <span class="day-title">{dayName}</span>
            <span class="day-type">{sessionType}</span>
        </div>
        <ul class="exercise-list">
            <li class="exercise-item">
                <div class="exercise-name">{exerciseName}</div>
                <div class="exercise-details">{sets}x{reps} <span class="weight-badge">{weight}</span></div>
            </li>
        </ul>
    </div>
</section>
```

### Key Principles

1. **Progressive Overload:** Gradually increase intensity, volume, or weight each week
2. **Specificity:** Train movements and energy systems specific to Hyrox
3. **Recovery:** Ensure adequate rest days
4. **Periodization:** Structure training in phases
5. **Individualization:** Adapt to athlete's schedule, equipment, and priorities
6. **Technique First:** Emphasize proper form before intensity
7. **Race Simulation:** Include full race simulations in later phases
8. **Transition Practice:** Dedicate time to practicing transitions"#;

fn division_label(intake: &Intake) -> String {
    match intake.age_group.as_deref().map(str::trim) {
        Some(group) if !group.is_empty() => {
            format!("{} (Age Group: {group})", intake.division.display_name())
        }
        _ => intake.division.display_name().to_string(),
    }
}

fn equipment_list(intake: &Intake) -> String {
    if intake.equipment.is_empty() {
        "Limited equipment - bodyweight and basic movements".to_string()
    } else {
        intake.equipment.join(", ")
    }
}

fn timed_line(name: &str, seconds: u32) -> String {
    format!("- **{name}:** {} ({seconds} seconds)", format_duration(seconds))
}

fn body_composition(intake: &Intake) -> Option<Vec<String>> {
    let target_weight = intake.target_weight?;
    let fmt_opt = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), |v| format!("{v}"));
    let mut lines = vec![
        format!(
            "- **Current:** {}kg, {}% body fat",
            fmt_opt(intake.current_weight),
            fmt_opt(intake.current_body_fat)
        ),
        format!(
            "- **Target:** {target_weight}kg, {}% body fat",
            fmt_opt(intake.target_body_fat)
        ),
    ];
    if let Some(current) = intake.current_weight {
        lines.push(format!("- **Goal:** Lose {:.1}kg fat", current - target_weight));
    }
    Some(lines)
}

fn phase_lines(phases: &TrainingPhases) -> Vec<String> {
    vec![
        format!(
            "1. **Weeks 1-{} (Foundation Phase):** Learn equipment, build base fitness, establish routine",
            phases.foundation_end
        ),
        format!(
            "2. **Weeks {}-{} (Build Phase):** Increase volume and intensity, improve station efficiency",
            phases.build_start, phases.build_end
        ),
        format!(
            "3. **Weeks {}-{} (Intensity Phase):** Race pace simulations, high intensity, full dress rehearsals",
            phases.intensity_start, phases.intensity_end
        ),
        format!(
            "4. **Weeks {}-{} (Peak Phase):** Maintain fitness while reducing fatigue, perfect race pace",
            phases.peak_start, phases.peak_end
        ),
        format!(
            "5. **Week {} (Taper Week):** Light technique work, stay fresh, trust your training",
            phases.taper_week
        ),
    ]
}

fn priority_focus(priority: &Priority) -> String {
    match priority.station {
        Station::WallBalls => "- **Wall Balls:** Practice 2-3x per week. Work up to sets of 25-30 unbroken. Always practice after running to simulate race fatigue.".to_string(),
        Station::Burpee => "- **Burpee Broad Jumps:** Practice 3x per week at home. Focus on efficiency: chest-to-ground, explosive jump forward. Target: 3.1 sec/burpee.".to_string(),
        Station::SledPull => "- **Sled Pull:** Weekly practice at gym. Focus on powerful arm pulls, driving with legs. Find optimal weight.".to_string(),
        Station::Lunges => "- **Sandbag Lunges:** Heavy DB walking lunges 2x/week at home. Build quad/glute endurance. Practice keeping upright posture.".to_string(),
        other => format!(
            "- **{}:** Dedicate extra training time to improve technique and efficiency.",
            other.name()
        ),
    }
}

fn station_target_line(station: Station) -> String {
    let target = format_clock(station.target_seconds());
    let note = match station {
        Station::SkiErg | Station::Row => " (pace ~2:22/500m)",
        Station::Burpee => " (aim for 3.1 sec/burpee)",
        Station::WallBalls => " (sets of 25-30 unbroken)",
        _ => "",
    };
    format!("- **{}:** Target {target}{note}", station.race_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::intake::tests::sample;

    #[test]
    fn test_phases_for_a_twelve_week_block() {
        assert_eq!(
            TrainingPhases::for_weeks(12),
            TrainingPhases {
                foundation_end: 3,
                build_start: 4,
                build_end: 7,
                intensity_start: 8,
                intensity_end: 10,
                peak_start: 11,
                peak_end: 11,
                taper_week: 12,
            }
        );
    }

    #[test]
    fn test_short_blocks_keep_two_foundation_weeks() {
        let phases = TrainingPhases::for_weeks(4);
        assert_eq!(phases.foundation_end, 2);
        assert_eq!(phases.taper_week, 4);
    }

    #[test]
    fn test_prompt_lists_priorities_by_savings() {
        let prompt = build_prompt(&sample(), 12);
        assert!(prompt.contains(
            "1. **Wall Balls** - Current: 6:00, Target: 3:30, Potential Savings: 2:30"
        ));
        assert!(prompt.contains(
            "2. **Sled Push** - Current: 3:10, Target: 2:30, Potential Savings: 0:40"
        ));
        assert!(prompt.contains("3. **SkiErg** - Current: 4:50, Target: 4:45, Potential Savings: 0:05"));
    }

    #[test]
    fn test_prompt_includes_race_context() {
        let prompt = build_prompt(&sample(), 12);
        assert!(prompt.contains("- **Race Division:** Men's Open (Age Group: 30-34)"));
        assert!(prompt.contains("  - Farmers Carry: 24kg each (2x = 48kg total)"));
        assert!(prompt.contains("- **Current Race Time:** 1:25:00 (5100 seconds)"));
        assert!(prompt.contains("- **Target 5K Time:** 21:42 (1302 seconds)"));
        assert!(prompt.contains("  - 1000m Row: N/A"));
        assert!(prompt.contains("- **Goal:** Lose 4.0kg fat"));
        assert!(prompt.contains("- **Rest Days per Week:** 1"));
        assert!(prompt.ends_with("Generate the complete training plan now."));
    }

    #[test]
    fn test_prompt_without_station_data_asks_for_all_round_fitness() {
        let mut intake = sample();
        intake.station_times.clear();
        intake.equipment.clear();
        intake.target_weight = None;
        let prompt = build_prompt(&intake, 8);
        assert!(prompt.contains("No previous race data provided."));
        assert!(prompt.contains("Limited equipment - bodyweight and basic movements"));
        assert!(!prompt.contains("Body Composition Goals"));
    }

    #[test]
    fn test_priority_focus_section() {
        let prompt = build_prompt(&sample(), 12);
        let start = prompt.find("## Priority-Based Training Focus").unwrap();
        let end = prompt.find("## Station-Specific Targets").unwrap();
        assert_snapshot!(prompt[start..end].trim_end(), @r"
        ## Priority-Based Training Focus

        - **Wall Balls:** Practice 2-3x per week. Work up to sets of 25-30 unbroken. Always practice after running to simulate race fatigue.
        - **Sled Push:** Dedicate extra training time to improve technique and efficiency.
        - **SkiErg:** Dedicate extra training time to improve technique and efficiency.
        ");
    }

    #[test]
    fn test_structure_section() {
        let prompt = build_prompt(&sample(), 12);
        let start = prompt.find("## Training Plan Structure").unwrap();
        let end = prompt.find("## Priority-Based Training Focus").unwrap();
        assert_snapshot!(prompt[start..end].trim_end(), @r"
        ## Training Plan Structure

        Generate a complete 12-week training plan with these phases:

        1. **Weeks 1-3 (Foundation Phase):** Learn equipment, build base fitness, establish routine
        2. **Weeks 4-7 (Build Phase):** Increase volume and intensity, improve station efficiency
        3. **Weeks 8-10 (Intensity Phase):** Race pace simulations, high intensity, full dress rehearsals
        4. **Weeks 11-11 (Peak Phase):** Maintain fitness while reducing fatigue, perfect race pace
        5. **Week 12 (Taper Week):** Light technique work, stay fresh, trust your training
        ");
    }
}

// Tests for choice configuration and choice collections - public API only

use benchreport::ErrorTag;
use benchreport::reporters::{
    ChoiceConf, Choices, ChoicesConf, CsvReporter, FlagType, Format, Reporter, Section, Target,
};
use std::collections::BTreeSet;

fn conf(name: &str, flag: &str) -> ChoiceConf {
    ChoiceConf::builder(name)
        .flag(flag)
        .description(format!("{} choice", name))
        .sections([Section::Ops])
        .targets([Target::Console, Target::Filesystem])
        .output_format(Format::Csv)
        .build()
        .unwrap()
}

#[test]
fn test_choice_conf_reads_back_configuration() {
    // Arrange & Act
    let conf = ChoiceConf::builder("timing-append")
        .flag("--timing-append")
        .flag("--ta")
        .flag_type(FlagType::TargetList)
        .description("timings appended to one file")
        .sections([Section::Timing])
        .targets([Target::Console, Target::Filesystem])
        .default_targets([Target::Filesystem])
        .output_format(Format::Csv)
        .subdir("timings")
        .file_suffix("csv")
        .file_append(true)
        .build()
        .unwrap();

    // Assert
    assert_eq!(conf.name(), "timing-append");
    assert_eq!(conf.flags(), &["--timing-append".to_string(), "--ta".to_string()]);
    assert_eq!(conf.flag_type(), FlagType::TargetList);
    assert_eq!(conf.sections(), &BTreeSet::from([Section::Timing]));
    assert_eq!(conf.default_targets(), Some(&BTreeSet::from([Target::Filesystem])));
    assert_eq!(conf.output_format(), Format::Csv);
    assert_eq!(conf.subdir(), Some("timings"));
    assert_eq!(conf.file_suffix(), Some("csv"));
    assert_eq!(conf.file_append(), Some(true));
    assert_eq!(conf.file_unique(), Some(false));
    assert!(conf.options().is_none());
}

#[test]
fn test_choice_conf_rejects_empty_sets() {
    // Arrange
    let no_sections = ChoiceConf::builder("a")
        .flag("--a")
        .description("a")
        .targets([Target::Console])
        .build();
    let no_targets = ChoiceConf::builder("a")
        .flag("--a")
        .description("a")
        .sections([Section::Ops])
        .build();
    let no_flags = ChoiceConf::builder("a")
        .description("a")
        .sections([Section::Ops])
        .targets([Target::Console])
        .build();

    // Assert
    assert_eq!(no_sections.unwrap_err().tag(), ErrorTag::ChoiceConfEmptySections);
    assert_eq!(no_targets.unwrap_err().tag(), ErrorTag::ChoiceConfEmptyTargets);
    assert_eq!(no_flags.unwrap_err().tag(), ErrorTag::ChoiceConfEmptyFlags);
}

#[test]
fn test_choice_conf_rejects_bad_flags_and_defaults() {
    // Arrange & Act
    let bad_flag = ChoiceConf::builder("a")
        .flag("--has space")
        .description("a")
        .sections([Section::Ops])
        .targets([Target::Console])
        .build();
    let bad_defaults = ChoiceConf::builder("a")
        .flag("--a")
        .description("a")
        .sections([Section::Ops])
        .targets([Target::Console])
        .default_targets([Target::Filesystem])
        .build();
    let conflict = ChoiceConf::builder("a")
        .flag("--a")
        .description("a")
        .sections([Section::Ops])
        .targets([Target::Console])
        .file_unique(true)
        .file_append(true)
        .build();

    // Assert
    assert_eq!(bad_flag.unwrap_err().tag(), ErrorTag::ChoiceConfInvalidFlag);
    assert_eq!(
        bad_defaults.unwrap_err().tag(),
        ErrorTag::ChoiceConfDefaultTargetsNotSubset
    );
    let err = conflict.unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(err.tag(), ErrorTag::ChoiceConfFileUniqueAppendConflict);
}

#[test]
fn test_choices_conf_rejects_duplicate_name() {
    // Arrange
    let mut choices = ChoicesConf::new();
    choices.add(conf("ops", "--ops")).unwrap();

    // Act
    let err = choices.add(conf("ops", "--ops2")).unwrap_err();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ChoicesDuplicateName);
    assert_eq!(choices.len(), 1);
}

#[test]
fn test_choices_conf_rejects_duplicate_flag() {
    // Arrange
    let mut choices = ChoicesConf::new();
    choices.add(conf("ops", "--ops")).unwrap();

    // Act
    let err = choices.add(conf("other", "--ops")).unwrap_err();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ChoicesDuplicateFlag);
    assert!(!choices.contains("other"));
}

#[test]
fn test_choices_extend_is_all_or_nothing() {
    // Arrange
    let mut choices = ChoicesConf::new();
    choices.add(conf("ops", "--ops")).unwrap();

    // Act
    let result = choices.extend([conf("timing", "--timing"), conf("ops", "--ops-again")]);

    // Assert
    assert!(result.is_err());
    assert_eq!(choices.names().collect::<Vec<_>>(), vec!["ops"]);
}

#[test]
fn test_choices_insert_requires_matching_key() {
    // Arrange
    let mut choices = ChoicesConf::new();

    // Act
    let err = choices.insert("wrong", conf("ops", "--ops")).unwrap_err();
    choices.insert("ops", conf("ops", "--ops")).unwrap();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ChoicesKeyNameMismatch);
    assert!(choices.get_by_flag("--ops").is_some());
}

#[test]
fn test_choices_remove_unknown_is_key_error() {
    // Arrange
    let mut choices = ChoicesConf::new();
    choices.add(conf("ops", "--ops")).unwrap();

    // Act
    let removed = choices.remove("ops").unwrap();
    let err = choices.remove("ops").unwrap_err();

    // Assert
    assert_eq!(removed.name(), "ops");
    assert_eq!(err.tag(), ErrorTag::ChoicesUnknownName);
    assert!(choices.get_by_flag("--ops").is_none());
}

#[test]
fn test_reporter_choices_lookup_by_arg() {
    // Arrange
    let reporter = CsvReporter::new().unwrap();

    // Act
    let choices: Choices = reporter.choices();

    // Assert
    assert_eq!(choices.get_choice_for_arg("csv.timing").unwrap().name(), "csv-timing");
    assert!(choices.all_choice_flags().contains("--csv.memory"));
    assert!(choices.all_choice_args().contains("csv.memory"));
}

#[test]
fn test_add_choice_binds_to_reporter() {
    // Arrange
    let reporter = CsvReporter::new().unwrap();
    let extra = ChoiceConf::builder("csv-peak")
        .flag("--csv.peak")
        .description("peak memory only")
        .sections([Section::PeakMemory])
        .targets([Target::Console])
        .output_format(Format::Csv)
        .build()
        .unwrap();

    // Act
    let choice = reporter.add_choice(extra).unwrap();

    // Assert
    assert_eq!(choice.reporter_name(), "csv");
    assert!(reporter.choices().contains("csv-peak"));
}

#[test]
fn test_add_choice_rejects_unsupported_format() {
    // Arrange
    let reporter = CsvReporter::new().unwrap();
    let json_choice = ChoiceConf::builder("csv-json")
        .flag("--csv.json")
        .description("wrong format")
        .sections([Section::Ops])
        .targets([Target::Console])
        .output_format(Format::Json)
        .build()
        .unwrap();

    // Act
    let err = reporter.add_choice(json_choice).unwrap_err();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ChoiceUnsupportedFormat);
    assert!(!reporter.choices().contains("csv-json"));
}

use codec_kit::{
    Decoder, Encoder, EnumCodecConfig, EnumDefinition, EnumStats, EnumValue, EnumVariant, Error,
    Size, Sizing, format_numerical_values, get_enum_codec, get_enum_decoder, get_enum_encoder,
    get_enum_index_from_discriminator, get_enum_index_from_variant, get_enum_stats, reverse_codec,
    short_u16_codec, try_transform_codec, u32_codec,
};
use serde_json::json;

/// Zero, Five = 5, Six, Nine = 9
fn numbers() -> EnumDefinition {
    EnumDefinition::new()
        .implicit("Zero")
        .explicit("Five", 5)
        .implicit("Six")
        .explicit("Nine", 9)
}

/// Up = "↑", Down = "↓", Left = "←", Right = "→"
fn arrows() -> EnumDefinition {
    EnumDefinition::new()
        .explicit("Up", "↑")
        .explicit("Down", "↓")
        .explicit("Left", "←")
        .explicit("Right", "→")
}

/// Zero, Five = 5, Six, Seven = "seven"
fn hybrid() -> EnumDefinition {
    EnumDefinition::new()
        .implicit("Zero")
        .explicit("Five", 5)
        .implicit("Six")
        .explicit("Seven", "seven")
}

/// A = 42, B = 42
fn duplicates() -> EnumDefinition {
    EnumDefinition::new().explicit("A", 42).explicit("B", 42)
}

fn value(value: impl Into<EnumValue>) -> EnumValue {
    value.into()
}

// ══════════════════════════════════════════════════════════════════════════
// Definitions and stats
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_implicit_values_count_from_zero() {
    let definition = EnumDefinition::new().implicit("A").implicit("B").implicit("C");
    let values: Vec<EnumValue> = definition.variants().iter().map(|v| v.value.clone()).collect();
    assert_eq!(values, [value(0), value(1), value(2)]);
}

#[test]
fn test_implicit_values_continue_after_explicit_number() {
    let definition = numbers();
    assert_eq!(definition.variants()[2], EnumVariant::new("Six", 6));
}

#[test]
fn test_implicit_value_after_lexical_continues_from_last_number() {
    let definition = EnumDefinition::new()
        .explicit("One", 1)
        .explicit("Word", "word")
        .implicit("Two");
    assert_eq!(definition.variants()[2].value, value(2));
}

#[test]
fn test_stats_sequential() {
    let stats = get_enum_stats(&EnumDefinition::new().implicit("A").implicit("B").implicit("C"));
    assert_eq!(stats.enum_keys, ["A", "B", "C"]);
    assert_eq!(stats.numerical_values, [0, 1, 2]);
    assert_eq!(stats.string_values, ["A", "B", "C"]);
    assert_eq!(stats.len(), 3);
}

#[test]
fn test_stats_explicit_numbers_are_sorted() {
    let definition = EnumDefinition::new().explicit("Big", 100).explicit("Small", 3);
    let stats = EnumStats::new(&definition);
    assert_eq!(stats.numerical_values, [3, 100]);
    assert_eq!(stats.enum_values, [value(100), value(3)]);
}

#[test]
fn test_stats_conflicting_numbers_are_deduplicated() {
    let stats = EnumStats::new(&duplicates());
    assert_eq!(stats.numerical_values, [42]);
    assert_eq!(stats.enum_values, [value(42), value(42)]);
    assert_eq!(stats.string_values, ["A", "B"]);
}

#[test]
fn test_stats_lexical() {
    let stats = EnumStats::new(&arrows());
    assert!(stats.numerical_values.is_empty());
    assert_eq!(stats.string_values, ["Up", "Down", "Left", "Right", "↑", "↓", "←", "→"]);
    assert_eq!(stats.lexical_values(), ["↑", "↓", "←", "→"]);
}

#[test]
fn test_stats_hybrid() {
    let definition = EnumDefinition::new()
        .implicit("Zero")
        .implicit("One")
        .explicit("Five", 5)
        .implicit("Six")
        .explicit("Seven", "nana")
        .explicit("Nine", 9)
        .explicit("NineAgain", 9);
    let stats = EnumStats::new(&definition);
    assert_eq!(stats.numerical_values, [0, 1, 5, 6, 9]);
    assert_eq!(
        stats.string_values,
        ["Zero", "One", "Five", "Six", "Seven", "Nine", "NineAgain", "nana"]
    );
    assert_eq!(stats.len(), 7);
}

#[test]
fn test_stats_string_values_skip_value_equal_to_key() {
    let definition = EnumDefinition::new().explicit("Up", "Up").explicit("Down", "down");
    let stats = EnumStats::new(&definition);
    assert_eq!(stats.string_values, ["Up", "Down", "down"]);
}

#[test]
fn test_empty_definition() {
    let stats = EnumStats::new(&EnumDefinition::new());
    assert!(stats.is_empty());
    assert!(stats.numerical_values.is_empty());
    assert!(stats.string_values.is_empty());
}

// ══════════════════════════════════════════════════════════════════════════
// Index lookups
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_index_from_variant_by_value_and_key() {
    let stats = EnumStats::new(&numbers());
    assert_eq!(get_enum_index_from_variant(&stats, &value(5)), Some(1));
    assert_eq!(get_enum_index_from_variant(&stats, &value("Five")), Some(1));
    assert_eq!(get_enum_index_from_variant(&stats, &value(9)), Some(3));
    assert_eq!(get_enum_index_from_variant(&stats, &value(1)), None);
    assert_eq!(get_enum_index_from_variant(&stats, &value("Missing")), None);
}

#[test]
fn test_index_from_variant_prefers_values_over_keys() {
    // A = "B", B = "A"
    let crossed = EnumDefinition::new().explicit("A", "B").explicit("B", "A");
    let stats = EnumStats::new(&crossed);
    assert_eq!(get_enum_index_from_variant(&stats, &value("B")), Some(0));
    assert_eq!(get_enum_index_from_variant(&stats, &value("A")), Some(1));
}

#[test]
fn test_index_from_variant_last_duplicate_wins() {
    let stats = EnumStats::new(&duplicates());
    assert_eq!(get_enum_index_from_variant(&stats, &value(42)), Some(1));
    assert_eq!(get_enum_index_from_variant(&stats, &value("A")), Some(0));

    let lexical = EnumDefinition::new().explicit("A", "x").explicit("B", "x");
    let stats = EnumStats::new(&lexical);
    assert_eq!(get_enum_index_from_variant(&stats, &value("x")), Some(1));
}

#[test]
fn test_index_from_discriminator_by_position() {
    let stats = EnumStats::new(&numbers());
    assert_eq!(get_enum_index_from_discriminator(&stats, 0, false), Some(0));
    assert_eq!(get_enum_index_from_discriminator(&stats, 3, false), Some(3));
    assert_eq!(get_enum_index_from_discriminator(&stats, 4, false), None);
    assert_eq!(get_enum_index_from_discriminator(&stats, -1, false), None);
}

#[test]
fn test_index_from_discriminator_by_value() {
    let stats = EnumStats::new(&numbers());
    assert_eq!(get_enum_index_from_discriminator(&stats, 5, true), Some(1));
    assert_eq!(get_enum_index_from_discriminator(&stats, 9, true), Some(3));
    assert_eq!(get_enum_index_from_discriminator(&stats, 1, true), None);

    let stats = EnumStats::new(&duplicates());
    assert_eq!(get_enum_index_from_discriminator(&stats, 42, true), Some(1));
}

#[test]
fn test_format_numerical_values() {
    let values = [1, 2, 3, 5, 12, 13, 14, 15, 42, 89, 90, 100];
    assert_eq!(format_numerical_values(&values), "1-3, 5, 12-15, 42, 89-90, 100");
    assert_eq!(format_numerical_values(&[0, 5, 6, 9]), "0, 5-6, 9");
    assert_eq!(format_numerical_values(&[7]), "7");
    assert_eq!(format_numerical_values(&[]), "");
}

#[test]
fn test_format_numerical_values_at_integer_limit() {
    let expected = format!("{}-{}", i64::MAX - 1, i64::MAX);
    assert_eq!(format_numerical_values(&[i64::MAX - 1, i64::MAX]), expected);
}

// ══════════════════════════════════════════════════════════════════════════
// Codec: numerical enums
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_numerical_enum_encodes_position_by_value() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value(0)).unwrap(), [0]);
    assert_eq!(codec.encode(&value(5)).unwrap(), [1]);
    assert_eq!(codec.encode(&value(6)).unwrap(), [2]);
    assert_eq!(codec.encode(&value(9)).unwrap(), [3]);
}

#[test]
fn test_numerical_enum_encodes_by_key() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value("Zero")).unwrap(), [0]);
    assert_eq!(codec.encode(&value("Five")).unwrap(), [1]);
    assert_eq!(codec.encode(&value("Six")).unwrap(), [2]);
    assert_eq!(codec.encode(&value("Nine")).unwrap(), [3]);
}

#[test]
fn test_numerical_enum_decodes_values() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.decode(&[0]).unwrap(), value(0));
    assert_eq!(codec.decode(&[1]).unwrap(), value(5));
    assert_eq!(codec.decode(&[2]).unwrap(), value(6));
    assert_eq!(codec.decode(&[3]).unwrap(), value(9));
}

#[test]
fn test_enum_pushes_offsets_forward() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    let mut buffer = [0u8; 10];
    assert_eq!(codec.write(&value(0), &mut buffer, 6).unwrap(), 7);
    assert_eq!(codec.read(&[0xff, 0xff, 0x00], 2).unwrap(), (value(0), 3));
}

#[test]
fn test_enum_rejects_missing_variant() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    let err = codec.encode(&value("Missing")).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidEnumVariant {
            variant: value("Missing"),
            numerical_values: vec![0, 5, 6, 9],
            string_values: vec!["Zero".into(), "Five".into(), "Six".into(), "Nine".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "invalid enum variant: expected one of [Zero, Five, Six, Nine] or a number in [0, 5-6, 9], got [Missing]"
    );
    assert!(codec.get_size_from_value(&value(1)).is_err());
}

#[test]
fn test_enum_rejects_out_of_range_discriminator() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    let err = codec.decode(&[4]).unwrap_err();
    assert_eq!(
        err,
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 4,
            min_range: 0,
            max_range: 3,
            valid_discriminators: vec![0, 1, 2, 3],
        }
    );
    assert_eq!(
        err.to_string(),
        "enum discriminator out of range: expected a number in [0-3], got 4"
    );
}

#[test]
fn test_enum_out_of_range_two_variants() {
    let definition = EnumDefinition::new().implicit("Bad").implicit("Good");
    let codec = get_enum_codec(&definition, EnumCodecConfig::default()).unwrap();
    assert_eq!(
        codec.decode(&[2]).unwrap_err(),
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 2,
            min_range: 0,
            max_range: 1,
            valid_discriminators: vec![0, 1],
        }
    );
}

#[test]
fn test_empty_enum_decodes_nothing() {
    let codec = get_enum_codec(&EnumDefinition::new(), EnumCodecConfig::default()).unwrap();
    assert_eq!(
        codec.decode(&[0]).unwrap_err(),
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 0,
            min_range: 0,
            max_range: -1,
            valid_discriminators: vec![],
        }
    );
}

#[test]
fn test_enum_needs_discriminator_bytes() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    assert!(matches!(codec.decode(&[]), Err(Error::NotEnoughBytes { .. })));
}

// ══════════════════════════════════════════════════════════════════════════
// Codec: discriminator sizes
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_default_discriminator_is_one_byte() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.size(), Size::Fixed(1));
}

#[test]
fn test_u32_discriminator() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::new(u32_codec())).unwrap();
    assert_eq!(codec.size(), Size::Fixed(4));
    assert_eq!(codec.encode(&value(9)).unwrap(), [3, 0, 0, 0]);
    assert_eq!(codec.decode(&[2, 0, 0, 0]).unwrap(), value(6));
}

#[test]
fn test_short_u16_discriminator() {
    let codec = get_enum_codec(&numbers(), EnumCodecConfig::new(short_u16_codec())).unwrap();
    assert_eq!(codec.size(), Size::Variable { max_size: Some(3) });
    assert_eq!(codec.get_size_from_value(&value("Zero")).unwrap(), 1);
    assert_eq!(codec.encode(&value("Nine")).unwrap(), [3]);
}

#[test]
fn test_discriminator_must_fit_prefix_codec() {
    let definition = EnumDefinition::new().explicit("Big", 300);
    let config = EnumCodecConfig::default().with_values_as_discriminators();
    let codec = get_enum_codec(&definition, config).unwrap();
    assert_eq!(
        codec.encode(&value("Big")).unwrap_err(),
        Error::NumberOutOfRange {
            codec: "enum_discriminator",
            value: 300,
            min: 0,
            max: 255,
        }
    );
}

// ══════════════════════════════════════════════════════════════════════════
// Codec: values as discriminators
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_values_as_discriminators_encode() {
    let config = EnumCodecConfig::default().with_values_as_discriminators();
    let codec = get_enum_codec(&numbers(), config).unwrap();
    assert!(codec.uses_values_as_discriminators());
    assert_eq!(codec.encode(&value(0)).unwrap(), [0x00]);
    assert_eq!(codec.encode(&value(5)).unwrap(), [0x05]);
    assert_eq!(codec.encode(&value("Six")).unwrap(), [0x06]);
    assert_eq!(codec.encode(&value("Nine")).unwrap(), [0x09]);
}

#[test]
fn test_values_as_discriminators_decode() {
    let config = EnumCodecConfig::default().with_values_as_discriminators();
    let codec = get_enum_codec(&numbers(), config).unwrap();
    assert_eq!(codec.decode(&[0x05]).unwrap(), value(5));
    assert_eq!(codec.decode(&[0x09]).unwrap(), value(9));
    assert_eq!(
        codec.decode(&[0x01]).unwrap_err(),
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 1,
            min_range: 0,
            max_range: 9,
            valid_discriminators: vec![0, 5, 6, 9],
        }
    );
}

#[test]
fn test_values_as_discriminators_with_u32() {
    let config = EnumCodecConfig::new(u32_codec()).with_values_as_discriminators();
    let codec = get_enum_codec(&numbers(), config).unwrap();
    assert_eq!(codec.encode(&value(5)).unwrap(), [5, 0, 0, 0]);
    assert_eq!(codec.decode(&[9, 0, 0, 0]).unwrap(), value(9));
}

#[test]
fn test_values_as_discriminators_with_duplicates() {
    let config = EnumCodecConfig::default().with_values_as_discriminators();
    let codec = get_enum_codec(&duplicates(), config).unwrap();
    assert_eq!(codec.encode(&value("A")).unwrap(), [0x2a]);
    assert_eq!(codec.encode(&value("B")).unwrap(), [0x2a]);
    assert_eq!(codec.decode(&[0x2a]).unwrap(), value(42));
    assert_eq!(
        codec.decode(&[0x01]).unwrap_err(),
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 1,
            min_range: 42,
            max_range: 42,
            valid_discriminators: vec![42],
        }
    );
}

#[test]
fn test_values_as_discriminators_rejects_lexical_values() {
    let config = EnumCodecConfig::default().with_values_as_discriminators();
    let err = get_enum_codec(&hybrid(), config).unwrap_err();
    assert_eq!(
        err,
        Error::CannotUseLexicalValuesAsEnumDiscriminators {
            string_values: vec!["seven".into()],
        }
    );
    assert_eq!(err.to_string(), "cannot use lexical values [seven] as enum discriminators");
}

// ══════════════════════════════════════════════════════════════════════════
// Codec: duplicate, lexical and hybrid enums
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_conflicting_values_use_last_index() {
    let codec = get_enum_codec(&duplicates(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value(42)).unwrap(), [1]);
    assert_eq!(codec.encode(&value("A")).unwrap(), [0]);
    assert_eq!(codec.encode(&value("B")).unwrap(), [1]);
    assert_eq!(codec.decode(&[0]).unwrap(), value(42));
    assert_eq!(codec.decode(&[1]).unwrap(), value(42));
}

#[test]
fn test_lexical_enum() {
    let codec = get_enum_codec(&arrows(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value("↑")).unwrap(), [0]);
    assert_eq!(codec.encode(&value("Right")).unwrap(), [3]);
    assert_eq!(codec.decode(&[1]).unwrap(), value("↓"));
    assert_eq!(
        codec.encode(&value("Missing")).unwrap_err(),
        Error::InvalidEnumVariant {
            variant: value("Missing"),
            numerical_values: vec![],
            string_values: ["Up", "Down", "Left", "Right", "↑", "↓", "←", "→"]
                .map(String::from)
                .to_vec(),
        }
    );
}

#[test]
fn test_lexical_enum_rejects_numbers() {
    let codec = get_enum_codec(&arrows(), EnumCodecConfig::default()).unwrap();
    assert!(matches!(
        codec.encode(&value(0)),
        Err(Error::InvalidEnumVariant { .. })
    ));
}

#[test]
fn test_hybrid_enum() {
    let codec = get_enum_codec(&hybrid(), EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value(0)).unwrap(), [0]);
    assert_eq!(codec.encode(&value(5)).unwrap(), [1]);
    assert_eq!(codec.encode(&value(6)).unwrap(), [2]);
    assert_eq!(codec.encode(&value("seven")).unwrap(), [3]);
    assert_eq!(codec.encode(&value("Seven")).unwrap(), [3]);
    assert_eq!(codec.decode(&[3]).unwrap(), value("seven"));
    assert_eq!(
        codec.decode(&[4]).unwrap_err(),
        Error::EnumDiscriminatorOutOfRange {
            discriminator: 4,
            min_range: 0,
            max_range: 3,
            valid_discriminators: vec![0, 1, 2, 3],
        }
    );
}

#[test]
fn test_crossed_keys_and_values() {
    let crossed = EnumDefinition::new().explicit("A", "B").explicit("B", "A");
    let codec = get_enum_codec(&crossed, EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value("B")).unwrap(), [0]);
    assert_eq!(codec.encode(&value("A")).unwrap(), [1]);
    assert_eq!(codec.decode(&[0]).unwrap(), value("B"));
}

#[test]
fn test_enum_encoder_and_decoder_halves() {
    let encoder = get_enum_encoder(&numbers(), EnumCodecConfig::default()).unwrap();
    let decoder = get_enum_decoder(&numbers(), EnumCodecConfig::default()).unwrap();
    let bytes = encoder.encode(&value("Six")).unwrap();
    assert_eq!(decoder.decode(&bytes).unwrap(), value(6));
    assert_eq!(encoder.stats(), decoder.stats());
}

// ══════════════════════════════════════════════════════════════════════════
// Definitions from JSON
// ══════════════════════════════════════════════════════════════════════════

#[test]
fn test_definition_from_json() {
    let definition: EnumDefinition = serde_json::from_value(json!([
        { "key": "Zero", "value": 0 },
        { "key": "Five", "value": 5 },
        { "key": "Word", "value": "word" },
    ]))
    .unwrap();
    assert_eq!(definition.variants()[1], EnumVariant::new("Five", 5));
    assert_eq!(definition.variants()[2].value, value("word"));

    let codec = get_enum_codec(&definition, EnumCodecConfig::default()).unwrap();
    assert_eq!(codec.encode(&value("word")).unwrap(), [2]);
}

#[test]
fn test_definition_to_json() {
    let encoded = serde_json::to_value(hybrid()).unwrap();
    assert_eq!(
        encoded,
        json!([
            { "key": "Zero", "value": 0 },
            { "key": "Five", "value": 5 },
            { "key": "Six", "value": 6 },
            { "key": "Seven", "value": "seven" },
        ])
    );
    let decoded: EnumDefinition = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, hybrid());
}

// ══════════════════════════════════════════════════════════════════════════
// Composition
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn key(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

fn directions() -> EnumDefinition {
    Direction::ALL
        .iter()
        .fold(EnumDefinition::new(), |definition, direction| definition.implicit(direction.key()))
}

#[test]
fn test_rust_enum_through_transform() {
    // One more variant on the wire than the Rust enum knows about.
    let definition = directions().implicit("Center");
    let enum_codec = get_enum_codec(&definition, EnumCodecConfig::default()).unwrap();
    let codec = try_transform_codec(
        enum_codec,
        |direction: &Direction| Ok(EnumValue::from(direction.key())),
        |decoded: EnumValue, _bytes: &[u8], _offset: usize| {
            decoded
                .as_number()
                .and_then(|index| usize::try_from(index).ok())
                .and_then(|index| Direction::ALL.get(index).copied())
                .ok_or_else(|| Error::custom(format!("unknown direction {decoded}")))
        },
    );

    assert_eq!(codec.encode(&Direction::Left).unwrap(), [2]);
    for direction in Direction::ALL {
        let bytes = codec.encode(&direction).unwrap();
        let decoded: Direction = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, direction);
    }

    let unknown: Result<Direction, Error> = codec.decode(&[4]);
    assert_eq!(unknown.unwrap_err(), Error::Message("unknown direction 4".into()));
    let out_of_range: Result<Direction, Error> = codec.decode(&[5]);
    assert!(matches!(
        out_of_range,
        Err(Error::EnumDiscriminatorOutOfRange { discriminator: 5, .. })
    ));
}

#[test]
fn test_big_endian_discriminator_through_reverse() {
    let enum_codec = get_enum_codec(&directions(), EnumCodecConfig::new(u32_codec())).unwrap();
    let codec = reverse_codec(enum_codec).unwrap();
    assert_eq!(codec.encode(&value("Down")).unwrap(), [0, 0, 0, 1]);
    assert_eq!(codec.decode(&[0, 0, 0, 3]).unwrap(), value(3));
}

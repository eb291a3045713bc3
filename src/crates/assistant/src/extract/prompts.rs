//! Prompt templates for entity extraction.
//!
//! Each prompt pins the model to a narrow output contract (a single token, a
//! code, a timestamp) so the extractor can validate the reply mechanically.
//! Relative time references are resolved by embedding the current wall-clock
//! time into the prompt's worked examples.

use chrono::{Datelike, Duration, NaiveDateTime};

/// Prompt for extracting the sensor type mentioned in free text.
pub fn sensor_type(text: &str) -> String {
    format!(
        r#"Instructions:
1. The purpose of this interaction is to extract the sensor type mentioned in the given text.
2. The extracted sensor type should be returned as a single string in title case.
3. The sensor types can include Temperature, Humidity, Motion, Light, Proximity, Accelerometer and Power.
4. If no sensor type is found, the response should be an empty string.
5. Understand relevant synonyms for the sensor types mentioned above and return the canonical sensor type.

Given the following text:
Question: {text}
Answer: "#
    )
}

/// Prompt for extracting a location code (canonical or alias) from free text.
pub fn location(text: &str) -> String {
    format!(
        r#"Instructions:
1. The purpose of this interaction is to extract a location mentioned in the given text.
2. The extracted location should be returned as a string in capital case.
3. The location can be in the format 'VER_W1_B2_GF_B' or 'VER_W1_B2_GF_A'.
4. The location may also contain aliases such as 'Verna Ground floor B' or 'Verna Ground floor A'.
5. If no location is found, the response should be '{no_location}'
6. If we don't know the warehouse from the location name, it can be represented by '%' (e.g., 'Verna building 2 Ground Floor' is 'VER_W%_B2_GF').
7. If we don't know the floor from the location name, it can be represented by '%' (e.g., 'Verna Warehouse 1 building 2' is 'VER_W1_B2_%').
8. If we don't know the building from the location name, it can be represented by '%' (e.g., 'Verna Warehouse 2 Ground Floor' is 'VER_W2_%_GF').

Examples:
- 'VER_W1_B2_GF_B' corresponds to 'Verna Warehouse 1 Building 2 Ground Floor B'.
- 'VER_W2_B5_FF_C' corresponds to 'Verna Warehouse 2 Building 5 First Floor C'.
- 'VER_W1_WARLVL_WARLVL_WARLVL' corresponds to 'Verna Warehouse level'.
- 'KUD_W1_WARLVL_WARLVL_WARLVL' corresponds to 'Kundai Warehouse level'.
- 'VER_W%_B2_GF' corresponds to 'Verna building 2 Ground Floor'.
- 'VER_W1_B2_%' corresponds to 'Verna Warehouse 1 building 2'.
- 'VER_W2_%_GF' corresponds to 'Verna Warehouse 2 Ground Floor'.

Given the following text:
Question: {text}
Answer: "#,
        no_location = super::NO_LOCATION,
    )
}

/// Prompt for extracting the oldest timestamp mentioned in free text.
pub fn time_from(text: &str, now: NaiveDateTime) -> String {
    let yesterday = now.date() - Duration::days(1);
    let last_month = first_of_previous_month(now);
    format!(
        r#"Instructions:
1. The purpose of this interaction is to extract the oldest timestamp mentioned in the given text.
2. The extracted timestamp should be in the format 'YYYY-MM-DDTHH:MM:SS'.
3. The oldest timestamp refers to the earlier datetime; if multiple timestamps are mentioned, return the earliest one.
4. Relative references like "today", "yesterday" or "last month" are interpreted against the current time, which is {now}.
5. If no timestamps are found, the response should be the current timestamp {now}.

Examples:
1. "Please give today's data for the temperature sensor in Verna ground floor." -> {today}T00:00:00
2. "Give me a report for the humidity sensor on the first floor yesterday." -> {yesterday}T00:00:00
3. "I need a report starting from June 1, 2023." -> 2023-06-01T00:00:00
4. "I need a report from last month." -> {last_month}T00:00:00
5. "Give me report from 1st Jan 2021 to 3rd March 2021." -> 2021-01-01T00:00:00
6. "No specific dates mentioned in the text." -> {now}

Given the following text:
Question: {text}
Answer: "#,
        now = now.format("%Y-%m-%dT%H:%M:%S"),
        today = now.date(),
        yesterday = yesterday,
        last_month = last_month,
    )
}

/// Prompt for extracting the latest timestamp mentioned in free text.
pub fn time_to(text: &str, now: NaiveDateTime) -> String {
    let yesterday = now.date() - Duration::days(1);
    let last_month_end = now.date().with_day(1).unwrap_or(now.date()) - Duration::days(1);
    format!(
        r#"Instructions:
1. The purpose of this interaction is to extract the latest timestamp mentioned in the given text.
2. The extracted timestamp should be in the format 'YYYY-MM-DDTHH:MM:SS'.
3. The latest timestamp refers to the most recent datetime; if multiple timestamps are mentioned, return the latest one.
4. Relative references like "today", "yesterday" or "last month" are interpreted against the current time, which is {now}.
5. By default, the latest timestamp is the current timestamp {now} unless specified in the text.
6. If only one day is specified, the latest timestamp is the end of that day.

Examples:
1. "Please give today's data for the temperature sensor in Verna ground floor." -> {now}
2. "Give me a report for the humidity sensor on the first floor yesterday." -> {yesterday}T23:59:59
3. "I need a report starting from June 1, 2023." -> 2023-06-01T23:59:59
4. "I need a report from last month." -> {last_month_end}T23:59:59
5. "Give me report from 1st Jan 2021 to 3rd March 2021." -> 2021-03-03T23:59:59
6. "No specific dates mentioned in the text." -> {now}

Given the following text:
Question: {text}
Answer: "#,
        now = now.format("%Y-%m-%dT%H:%M:%S"),
        yesterday = yesterday,
        last_month_end = last_month_end,
    )
}

/// First day of the month before the one containing `now`.
fn first_of_previous_month(now: NaiveDateTime) -> chrono::NaiveDate {
    let first_of_month = now.date().with_day(1).unwrap_or(now.date());
    (first_of_month - Duration::days(1))
        .with_day(1)
        .unwrap_or(first_of_month)
}

/// Test modules for grc-cli
///
/// Tests are organized into logical groupings:
/// - survey_engine: schema seeding, validation and response serialization
mod survey_engine;

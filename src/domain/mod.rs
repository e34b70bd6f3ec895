// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system: exam papers, subjects, training samples, and
// the seams other layers implement.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Keeping this layer pure means it is unit-testable without a
// GPU, and implementations behind the traits can be swapped
// without touching the rest of the code.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single exam paper with its extracted text
pub mod document;

// The two exam subjects the pipeline produces models for
pub mod subject;

// A tokenised, fixed-length training sample
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;

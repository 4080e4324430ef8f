// Live tests against the vendor API.
// Require TELEMATICS_EMAIL and TELEMATICS_PASSWORD (a .env file works) and are
// ignored by default: cargo test --test integration -- --ignored

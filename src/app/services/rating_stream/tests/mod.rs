//! Tests for the rating stream parser service

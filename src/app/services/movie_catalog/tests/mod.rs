//! Tests for the movie catalog service

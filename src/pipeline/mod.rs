// Multi-request pipelines built on the moderator.

pub mod batch;

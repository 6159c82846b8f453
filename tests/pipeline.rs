#[path = "support/source_harness.rs"]
mod source_harness;

#[path = "pipeline/budget.rs"]
mod budget;
#[path = "pipeline/chat.rs"]
mod chat;
#[path = "pipeline/generic.rs"]
mod generic;

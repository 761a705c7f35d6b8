mod classify;
mod drawio;
mod flowchart;

mod event_parse;
mod replay_pipeline;

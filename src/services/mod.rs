// Services module — pure advisory engines, separated from session state and commands
pub mod interactions; // medicine pair interaction index
pub mod nutrition;    // deficiency rules over a nutrition profile
pub mod symptoms;     // keyword-threshold symptom classifier

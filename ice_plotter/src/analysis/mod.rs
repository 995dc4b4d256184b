pub mod feature_selection;

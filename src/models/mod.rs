pub mod entry;
pub mod exam_goal;
pub mod goal;
pub mod goal_type;
pub mod mock_exam;
pub mod todo;

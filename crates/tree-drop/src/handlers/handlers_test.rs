//! Tests for the built-in drop handlers.

use super::*;
use crate::project::{InMemoryProject, ProjectError};
use crate::tree::{ContextValue, ProjectId};

fn registry() -> ProjectRegistry {
    let app = InMemoryProject::with_files(
        "app",
        "App",
        [
            "/sln/readme.md",
            "/sln/app/app.csproj",
            "/sln/app/Program.cs",
            "/sln/app/models/User.cs",
            "/sln/app/models/dto/UserDto.cs",
        ],
    );
    let lib = app.on_same_disk("lib", "Lib");
    ProjectRegistry::new().with(Arc::new(app)).with(Arc::new(lib))
}

fn app_project() -> TreeNode {
    TreeNode::project("p-app", "app", "/sln/app/app.csproj")
}

fn descriptions(actions: &[Box<dyn Action>]) -> Vec<String> {
    actions.iter().map(|a| a.describe()).collect()
}

async fn matching<'a>(handlers: &'a [Box<dyn DropHandler>], source: &TreeNode, target: &TreeNode) -> Vec<&'a str> {
    let mut names = Vec::new();
    for handler in handlers {
        if handler.can_handle(source, target).await {
            names.push(handler.name());
        }
    }
    names
}

#[test]
fn test_default_handlers_registration_order() {
    let handlers = default_handlers(&DropConfig::default());
    let names: Vec<&str> = handlers.iter().map(|h| h.name()).collect();
    assert_eq!(
        names,
        vec!["CopyExternalFileInProjects", "MoveFileInTheSameProject", "MoveFolderInTheSameProject"]
    );
}

#[test]
fn test_config_disables_copy_and_folder_handlers() {
    let config = DropConfig {
        copy_external_files: false,
        move_folders: false,
        ..DropConfig::default()
    };
    let handlers = default_handlers(&config);
    let names: Vec<&str> = handlers.iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["MoveFileInTheSameProject"]);
}

#[tokio::test]
async fn test_handlers_are_mutually_exclusive_by_node_kind() {
    let handlers = default_handlers(&DropConfig::default());
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let solution_file = TreeNode::solution_file("s-readme", "/sln/readme.md");
    assert_eq!(
        matching(&handlers, &solution_file, &models).await,
        vec!["CopyExternalFileInProjects"]
    );

    let own_file = TreeNode::project_file("f-program", "app", "/sln/app/Program.cs");
    assert_eq!(matching(&handlers, &own_file, &models).await, vec!["MoveFileInTheSameProject"]);

    let foreign_file = TreeNode::project_file("f-lib", "lib", "/sln/lib/Lib.cs");
    assert_eq!(
        matching(&handlers, &foreign_file, &models).await,
        vec!["CopyExternalFileInProjects"]
    );

    let dto = TreeNode::project_folder("f-dto", "app", "/sln/app/models/dto");
    assert_eq!(matching(&handlers, &dto, &app_project()).await, vec!["MoveFolderInTheSameProject"]);
}

#[tokio::test]
async fn test_nothing_handles_drops_onto_nodes_without_directory() {
    let handlers = default_handlers(&DropConfig::default());
    let reference = TreeNode::new("r", "System", ContextValue::ProjectReference).in_project("app");
    let virtual_folder = TreeNode::new("v", "Docs", ContextValue::SolutionFolder);
    let file = TreeNode::project_file("f-program", "app", "/sln/app/Program.cs");
    let readme = TreeNode::solution_file("s-readme", "/sln/readme.md");

    assert!(matching(&handlers, &file, &reference).await.is_empty());
    assert!(matching(&handlers, &readme, &virtual_folder).await.is_empty());
}

#[tokio::test]
async fn test_solution_file_cannot_be_copied_outside_projects() {
    let handler = CopyExternalFileInProjects::new("_copy");
    let readme = TreeNode::solution_file("s-readme", "/sln/readme.md");
    let other = TreeNode::solution_file("s-other", "/sln/notes.md");

    assert!(!handler.can_handle(&readme, &other).await);
}

#[tokio::test]
async fn test_copy_external_file_targets_directory_of_target_project() {
    let handler = CopyExternalFileInProjects::new("_copy");
    let readme = TreeNode::solution_file("s-readme", "/sln/readme.md");

    let actions = handler.handle(&readme, &app_project(), &registry()).await.unwrap();
    assert_eq!(descriptions(&actions), vec!["copy /sln/readme.md -> /sln/app"]);

    let program = TreeNode::project_file("f-program", "app", "/sln/app/Program.cs");
    let actions = handler.handle(&readme, &program, &registry()).await.unwrap();
    assert_eq!(descriptions(&actions), vec!["copy /sln/readme.md -> /sln/app"]);
}

#[tokio::test]
async fn test_move_file_into_folder() {
    let handler = MoveFileInTheSameProject::new("_copy");
    let program = TreeNode::project_file("f-program", "app", "/sln/app/Program.cs");
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let actions = handler.handle(&program, &models, &registry()).await.unwrap();
    assert_eq!(descriptions(&actions), vec!["move /sln/app/Program.cs -> /sln/app/models"]);
}

#[tokio::test]
async fn test_move_file_from_unregistered_project_fails() {
    let handler = MoveFileInTheSameProject::new("_copy");
    let file = TreeNode::project_file("f", "ghost", "/sln/ghost/a.cs");
    let folder = TreeNode::project_folder("d", "ghost", "/sln/ghost/sub");

    let err = handler.handle(&file, &folder, &registry()).await.err().unwrap();
    assert_eq!(err, DropError::ProjectNotRegistered(ProjectId::new("ghost")));
}

#[tokio::test]
async fn test_folder_cannot_move_into_itself_or_below() {
    let handler = MoveFolderInTheSameProject::new("_copy");
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");
    let dto = TreeNode::project_folder("f-dto", "app", "/sln/app/models/dto");
    let sibling = TreeNode::project_folder("f-views", "app", "/sln/app/views");
    // Same prefix, different folder
    let lookalike = TreeNode::project_folder("f-models2", "app", "/sln/app/models2");

    assert!(!handler.can_handle(&models, &models).await);
    assert!(!handler.can_handle(&models, &dto).await);
    assert!(handler.can_handle(&models, &sibling).await);
    assert!(handler.can_handle(&models, &lookalike).await);
}

#[tokio::test]
async fn test_folder_move_fans_out_per_file_keeping_layout() {
    let handler = MoveFolderInTheSameProject::new("_copy");
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");
    let views = TreeNode::project_folder("f-views", "app", "/sln/app/views");

    let actions = handler.handle(&models, &views, &registry()).await.unwrap();
    assert_eq!(
        descriptions(&actions),
        vec![
            "move /sln/app/models/User.cs -> /sln/app/views/models",
            "move /sln/app/models/dto/UserDto.cs -> /sln/app/views/models/dto",
        ]
    );
}

#[tokio::test]
async fn test_empty_folder_yields_no_actions() {
    let handler = MoveFolderInTheSameProject::new("_copy");
    let empty = TreeNode::project_folder("f-empty", "app", "/sln/app/empty");

    let actions = handler.handle(&empty, &app_project(), &registry()).await.unwrap();
    assert!(actions.is_empty());
}

#[tokio::test]
async fn test_folder_listing_failure_carries_folder_path() {
    let project = InMemoryProject::new("app", "App");
    project.fail_on(
        crate::project::FsPrimitive::List,
        ProjectError::PermissionDenied("models".to_string()),
    );
    let projects = ProjectRegistry::new().with(Arc::new(project));
    let handler = MoveFolderInTheSameProject::new("_copy");
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let err = handler.handle(&models, &app_project(), &projects).await.err().unwrap();
    assert!(matches!(err, DropError::Project { path, .. } if path == "/sln/app/models"));
}

#[tokio::test]
async fn test_copy_into_node_outside_any_project_is_invalid() {
    let handler = CopyExternalFileInProjects::new("_copy");
    let readme = TreeNode::solution_file("s-readme", "/sln/readme.md");
    let loose = TreeNode::new("d", "Docs", ContextValue::SolutionFolder).with_path("/sln/docs");

    let err = handler.handle(&readme, &loose, &registry()).await.err().unwrap();
    assert_eq!(err, DropError::InvalidPath("/sln/docs".to_string()));
}

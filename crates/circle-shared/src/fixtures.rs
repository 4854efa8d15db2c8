//! Fixed demo data rendered by the prototype pages.

use crate::types::{FileCategory, FileRecord, ItemIcon, Profile, ProfileId, SharedItem, SharedItemKind};

const AVATAR_PLACEHOLDER: &str = "/placeholder.svg?height=128&width=128";

fn profile(id: u32, name: &str, tags: [&str; 2], shared_items: Vec<SharedItem>) -> Profile {
    Profile {
        id: ProfileId(id),
        name: name.to_string(),
        avatar: AVATAR_PLACEHOLDER.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        shared_items,
    }
}

/// The five friends shown in the home carousel.
pub fn friends() -> Vec<Profile> {
    use ItemIcon::*;
    use SharedItemKind as K;

    vec![
        profile(
            1,
            "Alice Johnson",
            ["Work", "Book Club"],
            vec![
                SharedItem::new(K::File, "Project Proposal", FileText, "bg-blue-500"),
                SharedItem::new(K::Book, "Current Read: 1984", BookOpen, "bg-green-500"),
                SharedItem::new(K::Image, "Team Photo", Image, "bg-yellow-500"),
            ],
        ),
        profile(
            2,
            "Bob Smith",
            ["Music", "Photography"],
            vec![
                SharedItem::new(K::Playlist, "Road Trip Mix", Music, "bg-purple-500"),
                SharedItem::new(K::Album, "Summer Vacation", Image, "bg-pink-500"),
                SharedItem::new(K::File, "Photo Editing Tips", FileText, "bg-blue-500"),
            ],
        ),
        profile(
            3,
            "Charlie Brown",
            ["Work", "Fitness"],
            vec![
                SharedItem::new(K::File, "Meeting Notes", FileText, "bg-blue-500"),
                SharedItem::new(K::Voice, "Workout Plan", Mic, "bg-red-500"),
                SharedItem::new(K::Image, "Gym Progress", Image, "bg-green-500"),
            ],
        ),
        profile(
            4,
            "Diana Prince",
            ["Art", "Travel"],
            vec![
                SharedItem::new(K::Image, "Paris Sketches", Image, "bg-yellow-500"),
                SharedItem::new(K::Playlist, "Travel Tunes", Music, "bg-purple-500"),
                SharedItem::new(K::File, "Itinerary", FileText, "bg-blue-500"),
            ],
        ),
        profile(
            5,
            "Ethan Hunt",
            ["Sports", "Movies"],
            vec![
                SharedItem::new(K::File, "Game Strategy", FileText, "bg-blue-500"),
                SharedItem::new(K::Playlist, "Workout Mix", Music, "bg-green-500"),
                SharedItem::new(K::Image, "Team Logo", Image, "bg-red-500"),
            ],
        ),
    ]
}

/// The five file categories, in tab order.
pub fn file_categories() -> Vec<FileCategory> {
    [
        ("Documents", ItemIcon::FileText, "bg-blue-500"),
        ("Images", ItemIcon::Image, "bg-green-500"),
        ("Music", ItemIcon::Music, "bg-purple-500"),
        ("Voice Notes", ItemIcon::Mic, "bg-red-500"),
        ("Books", ItemIcon::BookOpen, "bg-yellow-500"),
    ]
    .into_iter()
    .map(|(name, icon, color)| FileCategory {
        name: name.to_string(),
        icon,
        color: color.to_string(),
    })
    .collect()
}

/// Files of one category, or `None` for a name that is not a category.
pub fn files_in(category: &str) -> Option<Vec<FileRecord>> {
    let files: &[(&str, &str)] = match category {
        "Documents" => &[
            ("Project Proposal.docx", "2023-05-15"),
            ("Budget Spreadsheet.xlsx", "2023-06-05"),
            ("Meeting Minutes.pdf", "2023-06-20"),
        ],
        "Images" => &[
            ("Vacation Photo.jpg", "2023-06-01"),
            ("Family Portrait.png", "2023-05-25"),
            ("Product Mockup.psd", "2023-06-15"),
        ],
        "Music" => &[
            ("Summer Playlist.mp3", "2023-06-10"),
            ("Workout Mix.mp3", "2023-06-12"),
            ("Relaxation Sounds.wav", "2023-06-18"),
        ],
        "Voice Notes" => &[
            ("Meeting Notes.mp3", "2023-06-15"),
            ("Lecture Recording.mp3", "2023-06-18"),
            ("Idea Brainstorm.m4a", "2023-06-22"),
        ],
        "Books" => &[
            ("1984.epub", "2023-05-20"),
            ("The Great Gatsby.pdf", "2023-05-30"),
            ("To Kill a Mockingbird.mobi", "2023-06-08"),
        ],
        _ => return None,
    };

    Some(
        files
            .iter()
            .map(|(name, date)| FileRecord::new(name, date))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_files() {
        for category in file_categories() {
            let files = files_in(&category.name).expect("category should have files");
            assert_eq!(files.len(), 3);
        }
        assert!(files_in("Videos").is_none());
    }

    #[test]
    fn friends_have_unique_ids() {
        let friends = friends();
        assert_eq!(friends.len(), 5);
        let mut ids: Vec<_> = friends.iter().map(|f| f.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}

use uuid::Uuid;

use crate::entities::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Lightbox over a project's images.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gallery {
    #[default]
    Closed,
    Open {
        project_id: Uuid,
        images: Vec<String>,
        index: usize,
    },
}

impl Gallery {
    /// Stays closed for a project without images.
    pub fn open(&mut self, project: &Project) {
        let images = project.all_images();
        *self = if images.is_empty() {
            Gallery::Closed
        } else {
            Gallery::Open { project_id: project.id, images, index: 0 }
        };
    }

    pub fn close(&mut self) {
        *self = Gallery::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Gallery::Open { .. })
    }

    pub fn next(&mut self) {
        if let Gallery::Open { images, index, .. } = self {
            *index = (*index + 1) % images.len();
        }
    }

    pub fn previous(&mut self) {
        if let Gallery::Open { images, index, .. } = self {
            *index = (*index + images.len() - 1) % images.len();
        }
    }

    pub fn backdrop_clicked(&mut self) {
        self.close();
    }

    pub fn key_pressed(&mut self, key: GalleryKey) {
        match key {
            GalleryKey::Escape => self.close(),
            GalleryKey::ArrowLeft => self.previous(),
            GalleryKey::ArrowRight => self.next(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        match self {
            Gallery::Open { images, index, .. } => images.get(*index).map(String::as_str),
            Gallery::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::tests::sample_project;

    fn with_images(n: usize) -> Project {
        let mut project = sample_project("Shots", &[]);
        project.images = (0..n).map(|i| format!("{}.png", i)).collect();
        project
    }

    #[test]
    fn navigation_wraps_around() {
        let mut gallery = Gallery::default();
        gallery.open(&with_images(3));
        assert_eq!(gallery.current(), Some("0.png"));

        gallery.previous();
        assert_eq!(gallery.current(), Some("2.png"));

        gallery.key_pressed(GalleryKey::ArrowRight);
        gallery.next();
        assert_eq!(gallery.current(), Some("1.png"));
    }

    #[test]
    fn cover_image_comes_first() {
        let mut project = with_images(1);
        project.image = Some("cover.png".into());

        let mut gallery = Gallery::default();
        gallery.open(&project);
        assert_eq!(gallery.current(), Some("cover.png"));
    }

    #[test]
    fn escape_and_backdrop_close() {
        let mut gallery = Gallery::default();
        gallery.open(&with_images(2));
        gallery.key_pressed(GalleryKey::Escape);
        assert!(!gallery.is_open());

        gallery.open(&with_images(2));
        gallery.backdrop_clicked();
        assert_eq!(gallery, Gallery::Closed);
    }

    #[test]
    fn project_without_images_never_opens() {
        let mut gallery = Gallery::default();
        gallery.open(&with_images(0));
        assert!(!gallery.is_open());
        gallery.next();
        assert_eq!(gallery.current(), None);
    }
}

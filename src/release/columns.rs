//! Column lookup for artifact tables.
//!
//! Artifact rows map cells to fields by column. When the table's header row
//! names its columns, the positions come from those names; otherwise the
//! conventional order (file name, kind, OS, arch, size, checksum) applies.

/// Positions of each artifact field within a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column holding the download anchor.
    pub link: usize,
    /// Column holding the kind label.
    pub kind: usize,
    /// Column holding the operating system.
    pub os: usize,
    /// Column holding the architecture.
    pub arch: usize,
    /// Column holding the size.
    pub size: usize,
    /// Column holding the checksum.
    pub checksum: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            link: 0,
            kind: 1,
            os: 2,
            arch: 3,
            size: 4,
            checksum: 5,
        }
    }
}

/// The field a header label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Link,
    Kind,
    Os,
    Arch,
    Size,
    Checksum,
}

impl Column {
    fn from_label(label: &str) -> Option<Self> {
        let normalised = label.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "kind" => Some(Self::Kind),
            "os" => Some(Self::Os),
            "arch" => Some(Self::Arch),
            "size" => Some(Self::Size),
            other if other.starts_with("file") => Some(Self::Link),
            other if other.contains("checksum") || other.starts_with("sha") => {
                Some(Self::Checksum)
            }
            _ => None,
        }
    }
}

impl ColumnLayout {
    /// Build a layout from header labels.
    ///
    /// Returns `None` unless every field is named exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use go_release_json::release::columns::ColumnLayout;
    ///
    /// let labels = ["Kind", "File name", "OS", "Arch", "Size", "SHA256 Checksum"];
    /// let layout = ColumnLayout::from_labels(&labels).expect("all columns named");
    /// assert_eq!(layout.link, 1);
    /// assert_eq!(layout.kind, 0);
    /// ```
    #[must_use]
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        let mut slots: [Option<usize>; 6] = [None; 6];
        for (position, label) in labels.iter().enumerate() {
            let Some(column) = Column::from_label(label.as_ref()) else {
                continue;
            };
            let slot = slots.get_mut(column as usize)?;
            if slot.replace(position).is_some() {
                return None;
            }
        }
        let [link, kind, os, arch, size, checksum] = slots;
        Some(Self {
            link: link?,
            kind: kind?,
            os: os?,
            arch: arch?,
            size: size?,
            checksum: checksum?,
        })
    }
}

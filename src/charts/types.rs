use serde::{Deserialize, Serialize};

/// Plotly trace kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

/// One data series of a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Vec<String>,
    pub y: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mode: Option<String>,
}

impl Trace {
    pub fn line(x: Vec<String>, y: Vec<u64>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            x,
            y,
            mode: Some("lines".to_string()),
        }
    }

    pub fn bar(x: Vec<String>, y: Vec<u64>) -> Self {
        Self {
            kind: TraceKind::Bar,
            x,
            y,
            mode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yaxis: Option<Axis>,
}

impl Layout {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            xaxis: None,
            yaxis: None,
        }
    }

    pub fn x_title(mut self, title: &str) -> Self {
        self.xaxis = Some(Axis {
            title: title.to_string(),
        });
        self
    }

    pub fn y_title(mut self, title: &str) -> Self {
        self.yaxis = Some(Axis {
            title: title.to_string(),
        });
        self
    }
}

/// A chart descriptor handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

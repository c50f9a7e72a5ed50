//! Histograma y densidad por kernel
//!
//! Binning de ancho fijo entre mínimo y máximo (el último bin es cerrado
//! por la derecha) y una KDE gaussiana con ancho de banda de Scott,
//! escalada a conteos para superponerla al histograma.

use std::f64::consts::PI;

use crate::analysis::describe::sample_std;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.start, self.bins.last()?.end))
    }

    pub fn bin_width(&self) -> f64 {
        self.bins.first().map(HistogramBin::width).unwrap_or(0.0)
    }
}

/// Agrupar `values` en `bins` intervalos de igual ancho; ignora no finitos
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Histogram { bins: Vec::new() };
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return Histogram {
            bins: vec![HistogramBin {
                start: min - 0.5,
                end: max + 0.5,
                count: finite.len(),
            }],
        };
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }

    Histogram { bins: result }
}

/// Ancho de banda de Scott: `std * n^(-1/5)`
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values);
    if !std.is_finite() || std == 0.0 {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// KDE gaussiana evaluada en `points` puntos equiespaciados de `[lo, hi]`
pub fn gaussian_kde(values: &[f64], lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
    let Some(bandwidth) = scott_bandwidth(values) else {
        return Vec::new();
    };
    if points < 2 || hi <= lo {
        return Vec::new();
    }

    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = (hi - lo) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}

/// Curva KDE en unidades de conteo para un histograma dado
pub fn kde_counts(values: &[f64], hist: &Histogram, points: usize) -> Vec<(f64, f64)> {
    let Some((lo, hi)) = hist.range() else {
        return Vec::new();
    };
    let scale = values.len() as f64 * hist.bin_width();
    gaussian_kde(values, lo, hi, points)
        .into_iter()
        .map(|(x, d)| (x, d * scale))
        .collect()
}

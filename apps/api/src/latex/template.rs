//! The résumé template's closed vocabulary: section headings, macro names,
//! and the static preamble/closing text. Extractor and generator both read
//! from here so the two directions cannot drift apart.

pub const RESUME_ITEM: &str = r"\resumeItem";
pub const RESUME_SUBHEADING: &str = r"\resumeSubheading";
pub const RESUME_PROJECT_HEADING: &str = r"\resumeProjectHeading";
pub const SUBHEADING_LIST_END: &str = r"\resumeSubHeadingListEnd";
pub const SECTION: &str = r"\section";
pub const END_DOCUMENT: &str = r"\end{document}";

/// A named division of the résumé and the literal heading text it is rendered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Education,
    Skills,
    Experience,
    Projects,
    Research,
    Publications,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Summary,
        Section::Education,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Research,
        Section::Publications,
        Section::Achievements,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Education => "Education",
            Section::Skills => "Core Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Research => "M.Tech Research Project",
            Section::Publications => "Publications",
            Section::Achievements => "Achievements",
        }
    }

    /// Lower-case key used in coverage reports.
    pub fn key(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Research => "research",
            Section::Publications => "publications",
            Section::Achievements => "achievements",
        }
    }

    /// Banner comment emitted above the section in generated output.
    pub fn banner(self) -> &'static str {
        match self {
            Section::Summary => "%-----------PROFESSIONAL SUMMARY-----------",
            Section::Education => "%-----------EDUCATION-----------",
            Section::Skills => "%-----------CORE SKILLS-----------",
            Section::Experience => "%-----------EXPERIENCE-----------",
            Section::Projects => "%-----------PROJECTS-----------",
            Section::Research => "%-----------RESEARCH PROJECT-----------",
            Section::Publications => "%-----------PUBLICATIONS-----------",
            Section::Achievements => "%-----------ACHIEVEMENTS---------------",
        }
    }

    /// The `\section{...}` line that opens this section.
    pub fn section_command(self) -> String {
        format!("{SECTION}{{{}}}", self.heading())
    }
}

pub const PREAMBLE: &str = r#"%-------------------------
% Resume in Latex
% Author : Jake Gutierrez
% Based off of: https://github.com/sb2nov/resume
% License : MIT
%------------------------

\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[colorlinks=true, urlcolor=blue]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\usepackage{fontawesome5}
\usepackage{multicol}
\usepackage[utf8]{inputenc}
\setlength{\multicolsep}{-3.0pt}
\setlength{\columnsep}{-1pt}
\input{glyphtounicode}

\pagestyle{fancy}
\fancyhf{} % clear all header and footer fields
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

% Adjust margins
\addtolength{\oddsidemargin}{-0.6in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1.19in}
\addtolength{\topmargin}{-.7in}
\addtolength{\textheight}{1.4in}

\urlstyle{same}

\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

% Sections formatting
\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large\bfseries
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

% Ensure that generate pdf is machine readable/ATS parsable
\pdfgentounicode=1

%-------------------------
% Custom commands
\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\classesList}[4]{
    \item\small{
        {#1 #2 #3 #4 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & \textbf{\small #2} \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubSubheading}[2]{
    \item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \textit{\small#1} & \textit{\small #2} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeProjectHeading}[2]{
    \item
    \begin{tabular*}{1.001\textwidth}{l@{\extracolsep{\fill}}r}
      \small#1 & \textbf{\small #2}\\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubItem}[1]{\resumeItem{#1}\vspace{-4pt}}

\renewcommand\labelitemi{$\vcenter{\hbox{\tiny$\bullet$}}$}
\renewcommand\labelitemii{$\vcenter{\hbox{\tiny$\bullet$}}$}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.0in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

%-------------------------------------------
%%%%%%  RESUME STARTS HERE  %%%%%%%%%%%%%%%%%%%%%%%%%%%%

\begin{document}
"#;

pub const CLOSING: &str = "\n\\end{document}\n";
